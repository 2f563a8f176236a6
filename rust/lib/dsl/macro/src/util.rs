//! Helpers shared by the macro expansions.

use proc_macro2::TokenStream;
use syn::{Lit, Meta};

/// Comma-separated attribute arguments: `module = "billing", auditable`.
pub struct AttrArgs(pub Vec<Meta>);

impl syn::parse::Parse for AttrArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let parsed =
            syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated(input)?;
        Ok(Self(parsed.into_iter().collect()))
    }
}

pub fn parse_attr_args(attr: TokenStream) -> syn::Result<AttrArgs> {
    syn::parse2(attr)
}

/// Value of a `key = "..."` argument, if it is a string literal.
pub fn str_value(meta: &Meta, key: &str) -> Option<String> {
    if let Meta::NameValue(nv) = meta {
        if nv.path.is_ident(key) {
            if let syn::Expr::Lit(syn::ExprLit {
                lit: Lit::Str(s), ..
            }) = &nv.value
            {
                return Some(s.value());
            }
        }
    }
    None
}

/// PascalCase → SCREAMING_SNAKE_CASE.
/// "InProgress" → "IN_PROGRESS", "Draft" → "DRAFT"
pub fn pascal_to_screaming_snake(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(ch.to_ascii_uppercase());
    }
    result
}

/// True when a `#[serde(...)]` attribute already sets `default` or
/// `default = "..."`. Only the argument paths are compared, never literals.
pub fn has_serde_default(attrs: &[syn::Attribute]) -> bool {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("serde"))
        .filter_map(|a| {
            a.parse_args_with(
                syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
            )
            .ok()
        })
        .flatten()
        .any(|meta| meta.path().is_ident("default"))
}

/// True for `Option<Timestamp>` or `Option<DateTime<..>>`, however qualified.
pub fn is_optional_timestamp(ty: &syn::Type) -> bool {
    let Some(syn::Type::Path(inner)) = option_inner(ty) else {
        return false;
    };
    inner
        .path
        .segments
        .last()
        .is_some_and(|seg| seg.ident == "Timestamp" || seg.ident == "DateTime")
}

/// `T` for `Option<T>`, `None` for anything else.
pub fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    if let syn::Type::Path(tp) = ty {
        if let Some(seg) = tp.path.segments.last() {
            if seg.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &seg.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return Some(inner);
                    }
                }
            }
        }
    }
    None
}
