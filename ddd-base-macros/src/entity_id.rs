use crate::derive_utils::apply_derives;
use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[entity_id] 宏实现
/// 仅支持单字段 tuple struct，并为包装类型：
/// - 合并/追加派生：Clone, Debug(可控), Serialize, Deserialize（透明序列化，反序列化时校验）
/// - 手写 PartialEq/Eq/Hash（与值对象一致，唯一分量为内部值）
/// - 实现 Identifier（可选 IntegerIdentifier）、Display、FromStr、AsRef 与转换
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityIdAttrConfig);
    let input = parse_macro_input!(item as Item);

    let st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity_id] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let inner_ty = match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
        syn::Fields::Unnamed(f) => {
            return syn::Error::new(
                f.span(),
                "#[entity_id] requires a tuple struct with exactly one field",
            )
            .to_compile_error()
            .into();
        }
        _ => {
            return syn::Error::new(
                st.span(),
                "#[entity_id] supports only tuple struct, e.g., struct X(Uuid);",
            )
            .to_compile_error()
            .into();
        }
    };

    // 合并/规范 derive；相等与哈希由本宏生成，整数标识不允许 Default（0 非法）
    let mut st_out = st.clone();
    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    let excluded: &[&str] = if cfg.integer {
        &["PartialEq", "Eq", "Hash", "Default"]
    } else {
        &["PartialEq", "Eq", "Hash"]
    };
    apply_derives(&mut st_out.attrs, required, excluded);

    // 透明序列化：经由内部值往返，反序列化走 TryFrom 以复用构造校验
    let inner_str = inner_ty.to_token_stream().to_string();
    st_out
        .attrs
        .push(syn::parse_quote!(#[serde(try_from = #inner_str, into = #inner_str)]));

    let ident = &st_out.ident;
    let generics = st_out.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let validated = cfg.integer || cfg.validate.is_some();

    let positive_check = cfg.integer.then(|| {
        quote! { ::ddd_base::identifier::ensure_positive(*value)?; }
    });
    let custom_check = cfg.validate.as_ref().map(|path| {
        quote! { #path(value)?; }
    });
    let validate_fn = validated.then(|| {
        quote! {
            fn validate(value: &Self::Value) -> ::ddd_base::error::DomainResult<()> {
                #positive_check
                #custom_check
                ::core::result::Result::Ok(())
            }
        }
    });

    let integer_impl = cfg.integer.then(|| {
        quote! {
            impl #impl_generics ::ddd_base::identifier::IntegerIdentifier for #ident #ty_generics #where_clause {}
        }
    });

    // 未校验的标识可直接由内部值构造；带校验的标识只提供 TryFrom
    let construction = if validated {
        quote! {
            impl #impl_generics ::core::convert::TryFrom<#inner_ty> for #ident #ty_generics #where_clause {
                type Error = ::ddd_base::error::DomainError;
                fn try_from(value: #inner_ty) -> ::core::result::Result<Self, Self::Error> {
                    <Self as ::ddd_base::identifier::Identifier>::try_new(value)
                }
            }
        }
    } else {
        quote! {
            impl #impl_generics #ident #ty_generics #where_clause {
                pub fn new(value: #inner_ty) -> Self { Self(value) }
            }

            impl #impl_generics ::core::convert::From<#inner_ty> for #ident #ty_generics #where_clause {
                fn from(value: #inner_ty) -> Self { Self(value) }
            }
        }
    };

    let out = quote! {
        #st_out

        impl #impl_generics ::ddd_base::value_object::ValueObject for #ident #ty_generics #where_clause {
            fn equality_components(&self) -> ::std::vec::Vec<::ddd_base::value_object::Component<'_>> {
                ::std::vec![::core::option::Option::Some(
                    &self.0 as &dyn ::ddd_base::value_object::EqualityComponent
                )]
            }
        }

        impl #impl_generics ::core::cmp::PartialEq for #ident #ty_generics #where_clause {
            fn eq(&self, other: &Self) -> bool {
                ::ddd_base::value_object::ValueObject::value_eq(self, other)
            }
        }

        impl #impl_generics ::core::cmp::Eq for #ident #ty_generics #where_clause {}

        impl #impl_generics ::core::hash::Hash for #ident #ty_generics #where_clause {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(::ddd_base::value_object::ValueObject::value_hash(self));
            }
        }

        impl #impl_generics ::ddd_base::identifier::Identifier for #ident #ty_generics #where_clause {
            type Value = #inner_ty;

            fn value(&self) -> &Self::Value { &self.0 }

            fn wrap(value: Self::Value) -> Self { Self(value) }

            #validate_fn
        }

        #integer_impl

        #construction

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #where_clause {
            type Err = ::ddd_base::error::DomainError;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let inner: #inner_ty = s
                    .parse()
                    .map_err(::ddd_base::error::DomainError::parse)?;
                <Self as ::ddd_base::identifier::Identifier>::try_new(inner)
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl #impl_generics ::core::convert::AsRef<#inner_ty> for #ident #ty_generics #where_clause {
            fn as_ref(&self) -> &#inner_ty { &self.0 }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for #inner_ty #where_clause {
            fn from(value: #ident #ty_generics) -> Self { value.0 }
        }

        impl #impl_generics ::core::convert::From<&#ident #ty_generics> for #inner_ty #where_clause {
            fn from(value: &#ident #ty_generics) -> Self { value.0.clone() }
        }
    };

    TokenStream::from(out)
}

// -------- parsing --------

#[derive(Default)]
struct EntityIdAttrConfig {
    integer: bool,
    validate: Option<syn::Path>,
    derive_debug: Option<bool>,
}

impl Parse for EntityIdAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self::default();
        if input.is_empty() {
            return Ok(cfg);
        }

        let elems: Punctuated<EntityIdAttrElem, Token![,]> =
            Punctuated::<EntityIdAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                EntityIdAttrElem::Integer(span) => {
                    if cfg.integer {
                        return Err(syn::Error::new(span, "duplicate key 'integer' in attribute"));
                    }
                    cfg.integer = true;
                }
                EntityIdAttrElem::Validate(path) => {
                    if cfg.validate.is_some() {
                        return Err(syn::Error::new(
                            path.span(),
                            "duplicate key 'validate' in attribute",
                        ));
                    }
                    cfg.validate = Some(path);
                }
                EntityIdAttrElem::Debug(b) => {
                    if cfg.derive_debug.is_some() {
                        return Err(syn::Error::new(
                            proc_macro2::Span::call_site(),
                            "duplicate key 'debug' in attribute",
                        ));
                    }
                    cfg.derive_debug = Some(b);
                }
            }
        }

        Ok(cfg)
    }
}

enum EntityIdAttrElem {
    Integer(proc_macro2::Span),
    Validate(syn::Path),
    Debug(bool),
}

impl Parse for EntityIdAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        if key == "integer" {
            Ok(EntityIdAttrElem::Integer(key.span()))
        } else if key == "validate" {
            let _eq: Token![=] = input.parse()?;
            let path: syn::Path = input.parse()?;
            Ok(EntityIdAttrElem::Validate(path))
        } else if key == "debug" {
            let _eq: Token![=] = input.parse()?;
            let expr: syn::Expr = input.parse()?;
            match expr {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Bool(b),
                    ..
                }) => Ok(EntityIdAttrElem::Debug(b.value())),
                other => Err(syn::Error::new(
                    other.span(),
                    "expected boolean literal for 'debug'",
                )),
            }
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'integer' | 'validate' | 'debug'",
            ))
        }
    }
}
