//! `#[state_enum]` macro expansion.
//!
//! Generates: Serialize/Deserialize (SCREAMING_SNAKE_CASE), Display, FromStr,
//! Default (first variant), StateEnum impl, an opaque Value impl, and a
//! static `variants()` list.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemEnum;

use crate::util::{parse_attr_args, pascal_to_screaming_snake, str_value};

pub fn expand(attr: TokenStream, item: ItemEnum) -> syn::Result<TokenStream> {
    let module = parse_module_attr(attr)?;

    let enum_name = &item.ident;
    let enum_name_str = enum_name.to_string();
    let vis = &item.vis;

    let doc_attrs: Vec<_> = item.attrs.iter().filter(|a| a.path().is_ident("doc")).collect();
    let pass_attrs: Vec<_> = item
        .attrs
        .iter()
        .filter(|a| !a.path().is_ident("doc") && !a.path().is_ident("state_enum"))
        .collect();

    if item.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            enum_name,
            "state_enum requires at least one variant",
        ));
    }

    for v in &item.variants {
        if !v.fields.is_empty() {
            return Err(syn::Error::new_spanned(
                v,
                "state_enum variants must be unit (no fields)",
            ));
        }
    }

    let variant_docs: Vec<Vec<_>> = item
        .variants
        .iter()
        .map(|v| v.attrs.iter().filter(|a| a.path().is_ident("doc")).collect())
        .collect();
    let variant_idents: Vec<_> = item.variants.iter().map(|v| &v.ident).collect();
    let variant_screaming: Vec<String> = variant_idents
        .iter()
        .map(|id| pascal_to_screaming_snake(&id.to_string()))
        .collect();

    let first_variant = &variant_idents[0];

    // Display: variant → SCREAMING_SNAKE_CASE string
    let display_arms: Vec<_> = variant_idents
        .iter()
        .zip(variant_screaming.iter())
        .map(|(ident, s)| quote! { Self::#ident => f.write_str(#s) })
        .collect();

    // FromStr: SCREAMING_SNAKE_CASE → variant (case-insensitive)
    let from_str_arms: Vec<_> = variant_idents
        .iter()
        .zip(variant_screaming.iter())
        .map(|(ident, s)| {
            let lower = s.to_ascii_lowercase();
            quote! { #lower => Ok(Self::#ident) }
        })
        .collect();

    let variant_count = variant_screaming.len();

    Ok(quote! {
        #(#doc_attrs)*
        #(#pass_attrs)*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        #vis enum #enum_name {
            #( #(#variant_docs)* #variant_idents ),*
        }

        impl ::std::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(#display_arms),*
                }
            }
        }

        impl ::std::str::FromStr for #enum_name {
            type Err = bizmodel_types::ModelError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    #(#from_str_arms,)*
                    _ => Err(bizmodel_types::ModelError::UnknownVariant {
                        enum_name: #enum_name_str,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl Default for #enum_name {
            fn default() -> Self {
                Self::#first_variant
            }
        }

        impl bizmodel_types::StateEnum for #enum_name {
            fn module() -> &'static str { #module }
            fn enum_name() -> &'static str { #enum_name_str }
            fn variants() -> &'static [&'static str] {
                const V: [&str; #variant_count] = [#(#variant_screaming),*];
                &V
            }
        }

        impl bizmodel_types::Value for #enum_name {
            fn is_empty_value(&self) -> bool {
                false
            }

            fn normalize_value(&mut self) -> bizmodel_types::Outcome {
                bizmodel_types::Outcome::Keep
            }
        }
    })
}

fn parse_module_attr(attr: TokenStream) -> syn::Result<String> {
    let args = parse_attr_args(attr)?;
    args.0
        .iter()
        .find_map(|meta| str_value(meta, "module"))
        .ok_or_else(|| {
            syn::Error::new(
                proc_macro2::Span::call_site(),
                "state_enum requires: #[state_enum(module = \"...\")]",
            )
        })
}
