use crate::derive_utils::apply_derives;
use crate::field_utils::{is_option, take_skip_marker};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, ItemStruct, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[value_object] 宏实现
/// - 结构体（具名或 tuple）：按字段顺序生成相等分量，手写 PartialEq/Eq/Hash
/// - 枚举：派生 PartialEq/Eq/Hash，整体作为唯一分量
/// - 合并/追加派生：Clone, (Debug 可控), Serialize, Deserialize
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ValueObjectAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];

    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }

    let out = match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required, &["PartialEq", "Eq", "Hash"]);
            match expand_struct(st) {
                Ok(ts) => ts,
                Err(err) => return err.to_compile_error().into(),
            }
        }
        Item::Enum(en) => {
            required.extend([
                syn::parse_quote!(PartialEq),
                syn::parse_quote!(Eq),
                syn::parse_quote!(Hash),
            ]);
            apply_derives(&mut en.attrs, required, &[]);

            let ident = &en.ident;
            let generics = with_component_bounds(&en.generics);
            let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
            quote! {
                #en

                impl #impl_generics ::ddd_base::value_object::ValueObject for #ident #ty_generics #where_clause {
                    fn equality_components(&self) -> ::std::vec::Vec<::ddd_base::value_object::Component<'_>> {
                        ::std::vec![::core::option::Option::Some(
                            self as &dyn ::ddd_base::value_object::EqualityComponent
                        )]
                    }
                }
            }
        }
        other => {
            return syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
                .to_compile_error()
                .into();
        }
    };

    TokenStream::from(out)
}

fn expand_struct(st: &mut ItemStruct) -> Result<TokenStream2> {
    let mut components: Vec<TokenStream2> = Vec::new();

    for (index, field) in st.fields.iter_mut().enumerate() {
        if take_skip_marker(field)? {
            continue;
        }

        let access = match &field.ident {
            Some(ident) => quote! { self.#ident },
            None => {
                let index = syn::Index::from(index);
                quote! { self.#index }
            }
        };

        let component = if is_option(&field.ty) {
            quote! {
                #access
                    .as_ref()
                    .map(|v| v as &dyn ::ddd_base::value_object::EqualityComponent)
            }
        } else {
            quote! {
                ::core::option::Option::Some(&#access as &dyn ::ddd_base::value_object::EqualityComponent)
            }
        };
        components.push(component);
    }

    let ident = &st.ident;
    let generics = with_component_bounds(&st.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #st

        impl #impl_generics ::ddd_base::value_object::ValueObject for #ident #ty_generics #where_clause {
            fn equality_components(&self) -> ::std::vec::Vec<::ddd_base::value_object::Component<'_>> {
                ::std::vec![#(#components),*]
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
    })
}

// 类型参数作为相等分量时需满足 `PartialEq + Hash + 'static`
fn with_component_bounds(generics: &syn::Generics) -> syn::Generics {
    let mut generics = generics.clone();
    let params: Vec<syn::Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause.predicates.push(syn::parse_quote! {
            #param: ::core::cmp::PartialEq + ::core::hash::Hash + 'static
        });
    }
    generics
}

// -------- parsing --------

struct ValueObjectAttrConfig {
    derive_debug: Option<bool>,
}

impl Parse for ValueObjectAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self { derive_debug: None });
        }

        let mut derive_debug: Option<bool> = None;
        let pairs: Punctuated<ValueObjectAttrElem, Token![,]> =
            Punctuated::parse_terminated(input)?;

        for elem in pairs {
            match elem {
                ValueObjectAttrElem::Debug(b) => {
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
        Ok(Self { derive_debug })
    }
}

enum ValueObjectAttrElem {
    Debug(bool),
}

impl Parse for ValueObjectAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        if key == "debug" {
            let _eq: Token![=] = input.parse()?;
            let expr: syn::Expr = input.parse()?;
            match expr {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Bool(b),
                    ..
                }) => Ok(Self::Debug(b.value())),
                other => Err(syn::Error::new(
                    other.span(),
                    "expected boolean literal for 'debug'",
                )),
            }
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'debug'",
            ))
        }
    }
}
