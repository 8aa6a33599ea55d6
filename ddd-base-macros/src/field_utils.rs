use syn::{Field, FieldsNamed, Token, Type, punctuated::Punctuated, spanned::Spanned};

/// 确保具名字段结构体包含所需字段，并把它们按给定顺序移至最前
/// - 若字段已存在则复用原定义（保留用户的属性与可见性）
/// - 若缺失则以给定类型新建（私有字段）
/// - 其余字段保持原始相对顺序
pub(crate) fn ensure_leading_fields(fields_named: &mut FieldsNamed, required: &[(&str, &Type)]) {
    let old_named = fields_named.named.clone();
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    for (name, ty) in required.iter() {
        if let Some(existing) = old_named
            .iter()
            .find(|f| f.ident.as_ref().map(|i| i == *name).unwrap_or(false))
        {
            new_named.push(existing.clone());
        } else {
            let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
            let field: Field = syn::parse_quote! { #ident: #ty };
            new_named.push(field);
        }
    }

    for f in old_named.into_iter() {
        let is_required = f
            .ident
            .as_ref()
            .map(|i| required.iter().any(|(n, _)| i == n))
            .unwrap_or(false);
        if !is_required {
            new_named.push(f);
        }
    }

    fields_named.named = new_named;
}

/// 判断字段类型是否为 `Option<T>`（按路径末段识别，兼容 `std::option::Option<T>`）
pub(crate) fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => tp
            .path
            .segments
            .last()
            .map(|seg| {
                seg.ident == "Option"
                    && matches!(seg.arguments, syn::PathArguments::AngleBracketed(_))
            })
            .unwrap_or(false),
        Type::Group(g) => is_option(&g.elem),
        Type::Paren(p) => is_option(&p.elem),
        _ => false,
    }
}

/// 取出字段上的 `#[value_object(skip)]` 标记，返回是否跳过该字段
/// 其他属性原样保留；未知参数报错
pub(crate) fn take_skip_marker(field: &mut Field) -> syn::Result<bool> {
    let mut skip = false;
    let mut retained = Vec::with_capacity(field.attrs.len());

    for attr in field.attrs.drain(..) {
        if !attr.path().is_ident("value_object") {
            retained.push(attr);
            continue;
        }
        let key: syn::Ident = attr.parse_args()?;
        if key != "skip" {
            return Err(syn::Error::new(
                key.span(),
                "unknown field option; expected #[value_object(skip)]",
            ));
        }
        if skip {
            return Err(syn::Error::new(attr.span(), "duplicate #[value_object(skip)]"));
        }
        skip = true;
    }

    field.attrs = retained;
    Ok(skip)
}
