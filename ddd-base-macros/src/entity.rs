use crate::derive_utils::apply_derives;
use crate::field_utils::ensure_leading_fields;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Item, ItemStruct, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input,
};

/// #[entity] 宏实现
/// - 若缺失则追加字段：`id: Option<IdType>`，并置于字段最前；反序列化时该字段必填且非 null
/// - 自动实现 `::ddd_base::entity::Entity`（TYPE/id/id_slot）
/// - 基于标识生成 `PartialEq/Eq/Hash`，`Display` 输出 `<TYPE> [Id=<id>]`
/// - 支持参数：`#[entity(id = IdType, aggregate_root = true|false, debug = true|false)]`；
///   - `id` 必填，需实现 `Identifier`
///   - `aggregate_root` 默认 `false`，为 true 时实现 `AggregateRoot` 标记
///   - `debug` 默认 `true`（派生 Debug）。当为 `false` 时不派生 Debug，便于用户自定义实现。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let Some(id_type) = cfg.id_ty else {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[entity] requires an identifier type, e.g., #[entity(id = OrderId)]",
        )
        .to_compile_error()
        .into();
    };

    // 仅支持具名字段结构体
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    // 重新组织字段：确保 id 槽位在最前，并避免重复
    let slot_ty: Type = syn::parse_quote! { ::core::option::Option<#id_type> };
    ensure_leading_fields(fields_named, &[("id", &slot_ty)]);

    // 反序列化时拒绝缺失或为 null 的标识，实体不会以空标识离开映射层
    if let Some(id_field) = fields_named.named.first_mut() {
        id_field.attrs.push(syn::parse_quote!(
            #[serde(deserialize_with = "::ddd_base::entity::deserialize_id")]
        ));
    }

    // 合并/规范 derive：默认添加 Debug（可通过 debug=false 关闭）、Default、Serialize、Deserialize；
    // 相等与哈希只由标识决定，剔除用户派生的版本
    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required, &["PartialEq", "Eq", "Hash"]);

    let out_struct = ItemStruct { ..st };

    let ident = &out_struct.ident;
    let type_name = ident.to_string();
    let generics = out_struct.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let root_impl = cfg.aggregate_root.unwrap_or(false).then(|| {
        quote! {
            impl #impl_generics ::ddd_base::aggregate_root::AggregateRoot for #ident #ty_generics #where_clause {}
        }
    });

    let expanded = quote! {
        #out_struct

        impl #impl_generics ::ddd_base::entity::Entity for #ident #ty_generics #where_clause {
            const TYPE: &'static str = #type_name;

            type Id = #id_type;

            fn id(&self) -> ::core::option::Option<&Self::Id> { self.id.as_ref() }

            fn id_slot(
                &mut self,
                _token: ::ddd_base::entity::SlotToken,
            ) -> &mut ::core::option::Option<Self::Id> {
                &mut self.id
            }
        }

        impl #impl_generics ::core::cmp::PartialEq for #ident #ty_generics #where_clause {
            fn eq(&self, other: &Self) -> bool {
                ::ddd_base::entity::Entity::same_identity(self, other)
            }
        }

        impl #impl_generics ::core::cmp::Eq for #ident #ty_generics #where_clause {}

        impl #impl_generics ::core::hash::Hash for #ident #ty_generics #where_clause {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(::ddd_base::entity::Entity::identity_hash(self));
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&::ddd_base::entity::Entity::describe(self))
            }
        }

        #root_impl
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct EntityAttrConfig {
    id_ty: Option<Type>,
    aggregate_root: Option<bool>,
    derive_debug: Option<bool>,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut id_ty: Option<Type> = None;
        let mut aggregate_root: Option<bool> = None;
        let mut derive_debug: Option<bool> = None;

        let elems: Punctuated<EntityAttrElem, Token![,]> =
            Punctuated::<EntityAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                EntityAttrElem::Id(ty) => {
                    if id_ty.is_some() {
                        return Err(syn::Error::new(
                            ty.span(),
                            "duplicate key 'id' in attribute",
                        ));
                    }
                    id_ty = Some(*ty);
                }
                EntityAttrElem::AggregateRoot(b) => {
                    if aggregate_root.is_some() {
                        return Err(syn::Error::new(
                            proc_macro2::Span::call_site(),
                            "duplicate key 'aggregate_root' in attribute",
                        ));
                    }
                    aggregate_root = Some(b);
                }
                EntityAttrElem::Debug(b) => {
                    if derive_debug.is_some() {
                        return Err(syn::Error::new(
                            proc_macro2::Span::call_site(),
                            "duplicate key 'debug' in attribute",
                        ));
                    }
                    derive_debug = Some(b);
                }
            }
        }

        Ok(Self {
            id_ty,
            aggregate_root,
            derive_debug,
        })
    }
}

enum EntityAttrElem {
    Id(Box<Type>),
    AggregateRoot(bool),
    Debug(bool),
}

fn parse_bool(input: ParseStream, key: &str) -> Result<bool> {
    let _eq: Token![=] = input.parse()?;
    let expr: syn::Expr = input.parse()?;
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Bool(b),
            ..
        }) => Ok(b.value()),
        other => Err(syn::Error::new(
            other.span(),
            format!("expected boolean literal for '{key}'"),
        )),
    }
}

impl Parse for EntityAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        if key == "id" {
            let _eq: Token![=] = input.parse()?;
            let ty: Type = input.parse()?;
            Ok(EntityAttrElem::Id(Box::new(ty)))
        } else if key == "aggregate_root" {
            parse_bool(input, "aggregate_root").map(EntityAttrElem::AggregateRoot)
        } else if key == "debug" {
            parse_bool(input, "debug").map(EntityAttrElem::Debug)
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'id' | 'aggregate_root' | 'debug'",
            ))
        }
    }
}
