//! `#[entity]` macro expansion.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Fields, Ident, ItemStruct, Meta};

use crate::util::{
    has_serde_default, is_optional_timestamp, option_inner, parse_attr_args, str_value,
};

pub fn expand(attr: TokenStream, item: ItemStruct) -> syn::Result<TokenStream> {
    let attrs = parse_entity_attrs(attr)?;

    let struct_name = &item.ident;
    let struct_name_str = struct_name.unraw().to_string();
    let vis = &item.vis;
    let module = &attrs.module;

    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "entity must not be generic",
        ));
    }

    let doc_attrs: Vec<_> = item.attrs.iter().filter(|a| a.path().is_ident("doc")).collect();
    let pass_attrs: Vec<_> = item
        .attrs
        .iter()
        .filter(|a| !a.path().is_ident("doc") && !a.path().is_ident("entity"))
        .collect();

    let named = match &item.fields {
        Fields::Named(n) => n,
        _ => return Err(syn::Error::new_spanned(&item.ident, "entity must have named fields")),
    };

    // Strip #[property(...)] from field output, collect flags.
    // Add #[serde(default)] to all fields for flexible deserialization.
    let mut clean_fields = named.clone();
    let mut props = Vec::new();
    for field in clean_fields.named.iter_mut() {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(&*field, "field must have a name"))?;
        let flags = parse_property_flags(&field.attrs)?;
        field.attrs.retain(|a| !a.path().is_ident("property"));
        if !has_serde_default(&field.attrs) {
            field.attrs.push(syn::parse_quote!(#[serde(default)]));
        }
        props.push(Prop { ident, ty: field.ty.clone(), flags });
    }

    // Inject audit / soft-delete stamps if not already present. Either way
    // they are platform bookkeeping and flagged built-in.
    let mut stamp_names = Vec::new();
    if attrs.auditable {
        stamp_names.extend(["created_at", "modified_at"]);
    }
    if attrs.deletable {
        stamp_names.push("deleted_at");
    }
    for name in stamp_names {
        if let Some(existing) = props.iter_mut().find(|p| p.ident == name) {
            if !is_optional_timestamp(&existing.ty) {
                return Err(syn::Error::new_spanned(
                    &existing.ty,
                    format!("`{name}` must be Option<bizmodel_types::Timestamp>"),
                ));
            }
            existing.flags.builtin = true;
            continue;
        }
        let ident = format_ident!("{}", name);
        let ty: syn::Type = syn::parse_quote!(Option<bizmodel_types::Timestamp>);
        clean_fields.named.push(syn::parse_quote! {
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub #ident: #ty
        });
        props.push(Prop {
            ident,
            ty,
            flags: Flags { builtin: true, ..Flags::default() },
        });
    }

    let owners: Vec<&Prop> = props.iter().filter(|p| p.flags.owner).collect();
    if owners.len() > 1 {
        return Err(syn::Error::new_spanned(
            &owners[1].ident,
            "entity can have at most one #[property(owner)] field",
        ));
    }

    // ── Property descriptors ──
    let mut accessor_fns = Vec::new();
    let mut descriptors = Vec::new();
    for p in &props {
        let ident = &p.ident;
        let name_str = ident.unraw().to_string();
        let get = format_ident!("__get_{}", ident.unraw());
        let set = format_ident!("__set_{}", ident.unraw());
        let Flags { computed, builtin, read_only, .. } = p.flags;
        accessor_fns.push(quote! {
            fn #get(o: &#struct_name) -> &dyn bizmodel_types::Value { &o.#ident }
            fn #set(o: &mut #struct_name) -> &mut dyn bizmodel_types::Value { &mut o.#ident }
        });
        descriptors.push(quote! {
            bizmodel_types::PropertyDescriptor::new(
                #name_str,
                bizmodel_types::PropertyFlags {
                    computed: #computed,
                    builtin: #builtin,
                    read_only: #read_only,
                },
                #get,
                #set,
            )
        });
    }
    let property_count = props.len();

    // ── Assign: everything but identity and bookkeeping ──
    let assigned: Vec<&Ident> = props
        .iter()
        .filter(|p| p.ident != "id" && !p.flags.builtin)
        .map(|p| &p.ident)
        .collect();

    // ── Capabilities ──
    let emptyful_impl = if attrs.custom_empty {
        quote! {}
    } else {
        quote! {
            impl bizmodel_types::Emptyful for #struct_name {
                fn is_empty(&self) -> bool {
                    bizmodel_types::is_empty_by_properties(self)
                }
            }
        }
    };

    let normalizable_impl = if attrs.custom_normalize {
        quote! {}
    } else {
        quote! {
            impl bizmodel_types::Normalizable for #struct_name {
                fn normalize(&mut self) {
                    bizmodel_types::normalize_by_properties(self)
                }
            }
        }
    };

    // ── Markers from field names and flags ──
    let identifiable_impl = props
        .iter()
        .find(|p| p.ident == "id")
        .map(|p| {
            let (id_ty, get) = optional_accessor(p);
            quote! {
                impl bizmodel_types::Identifiable for #struct_name {
                    type Id = #id_ty;
                    fn id(&self) -> Option<&Self::Id> { #get }
                }
            }
        });

    let owned_impl = owners.first().map(|p| {
        let (owner_ty, get) = optional_accessor(p);
        quote! {
            impl bizmodel_types::Owned for #struct_name {
                type OwnerId = #owner_ty;
                fn owner_id(&self) -> Option<&Self::OwnerId> { #get }
            }
        }
    });

    let stateful_impl = props.iter().find(|p| p.ident == "state").map(|p| {
        let (state_ty, get, set) = match option_inner(&p.ty) {
            Some(inner) => (
                inner.clone(),
                quote! { self.state },
                quote! { self.state = state; },
            ),
            None => (
                p.ty.clone(),
                quote! { Some(self.state) },
                quote! { self.state = state.unwrap_or_default(); },
            ),
        };
        quote! {
            impl bizmodel_types::Stateful for #struct_name {
                type State = #state_ty;
                fn state(&self) -> Option<Self::State> { #get }
                fn set_state(&mut self, state: Option<Self::State>) { #set }
            }
        }
    });

    let auditable_impl = attrs.auditable.then(|| {
        quote! {
            impl bizmodel_types::Auditable for #struct_name {
                fn created_at(&self) -> Option<&bizmodel_types::Timestamp> { self.created_at.as_ref() }
                fn modified_at(&self) -> Option<&bizmodel_types::Timestamp> { self.modified_at.as_ref() }
                fn set_created_at(&mut self, at: Option<bizmodel_types::Timestamp>) { self.created_at = at; }
                fn set_modified_at(&mut self, at: Option<bizmodel_types::Timestamp>) { self.modified_at = at; }
            }
        }
    });

    let deletable_impl = attrs.deletable.then(|| {
        quote! {
            impl bizmodel_types::Deletable for #struct_name {
                fn deleted_at(&self) -> Option<&bizmodel_types::Timestamp> { self.deleted_at.as_ref() }
                fn set_deleted_at(&mut self, at: Option<bizmodel_types::Timestamp>) { self.deleted_at = at; }
            }
        }
    });

    Ok(quote! {
        #(#doc_attrs)*
        #(#pass_attrs)*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        #vis struct #struct_name #clean_fields

        impl #struct_name {
            pub const __ENTITY_MODULE: &'static str = #module;
            pub const __ENTITY_NAME: &'static str = #struct_name_str;
        }

        impl bizmodel_types::Introspect for #struct_name {
            const TYPE_NAME: &'static str = #struct_name_str;

            fn properties() -> &'static [bizmodel_types::PropertyDescriptor<Self>] {
                #(#accessor_fns)*

                static PROPERTIES: [bizmodel_types::PropertyDescriptor<#struct_name>; #property_count] = [
                    #(#descriptors),*
                ];
                &PROPERTIES
            }
        }

        impl bizmodel_types::Value for #struct_name {
            fn is_empty_value(&self) -> bool {
                bizmodel_types::Emptyful::is_empty(self)
            }

            fn normalize_value(&mut self) -> bizmodel_types::Outcome {
                bizmodel_types::Normalizable::normalize(self);
                if bizmodel_types::Emptyful::is_empty(self) {
                    bizmodel_types::Outcome::Clear
                } else {
                    bizmodel_types::Outcome::Keep
                }
            }
        }

        impl bizmodel_types::Assign for #struct_name {
            #[allow(unused_variables)]
            fn assign(&mut self, other: &Self) {
                #( self.#assigned.clone_from(&other.#assigned); )*
            }
        }

        #emptyful_impl
        #normalizable_impl
        #identifiable_impl
        #owned_impl
        #stateful_impl
        #auditable_impl
        #deletable_impl
    })
}

struct Prop {
    ident: Ident,
    ty: syn::Type,
    flags: Flags,
}

#[derive(Clone, Copy, Default)]
struct Flags {
    computed: bool,
    builtin: bool,
    read_only: bool,
    owner: bool,
}

/// Target type and `Option<&T>` accessor body for a field that may or may
/// not be declared as `Option<T>`.
fn optional_accessor(p: &Prop) -> (syn::Type, TokenStream) {
    let ident = &p.ident;
    match option_inner(&p.ty) {
        Some(inner) => (inner.clone(), quote! { self.#ident.as_ref() }),
        None => (p.ty.clone(), quote! { Some(&self.#ident) }),
    }
}

fn parse_property_flags(attrs: &[syn::Attribute]) -> syn::Result<Flags> {
    let mut flags = Flags::default();
    for attr in attrs {
        if !attr.path().is_ident("property") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("computed") {
                flags.computed = true;
            } else if meta.path.is_ident("builtin") {
                flags.builtin = true;
            } else if meta.path.is_ident("read_only") {
                flags.read_only = true;
            } else if meta.path.is_ident("owner") {
                flags.owner = true;
            } else {
                return Err(meta.error("expected one of: computed, builtin, read_only, owner"));
            }
            Ok(())
        })?;
    }
    Ok(flags)
}

struct EntityAttrs {
    module: String,
    auditable: bool,
    deletable: bool,
    custom_empty: bool,
    custom_normalize: bool,
}

fn parse_entity_attrs(attr: TokenStream) -> syn::Result<EntityAttrs> {
    let args = parse_attr_args(attr)?;
    let mut module = None;
    let mut attrs = EntityAttrs {
        module: String::new(),
        auditable: false,
        deletable: false,
        custom_empty: false,
        custom_normalize: false,
    };

    for meta in &args.0 {
        if let Some(m) = str_value(meta, "module") {
            module = Some(m);
            continue;
        }
        let flag = match meta {
            Meta::Path(path) => path,
            other => return Err(syn::Error::new_spanned(other, "unsupported entity argument")),
        };
        if flag.is_ident("auditable") {
            attrs.auditable = true;
        } else if flag.is_ident("deletable") {
            attrs.deletable = true;
        } else if flag.is_ident("custom_empty") {
            attrs.custom_empty = true;
        } else if flag.is_ident("custom_normalize") {
            attrs.custom_normalize = true;
        } else {
            return Err(syn::Error::new_spanned(
                flag,
                "expected one of: auditable, deletable, custom_empty, custom_normalize",
            ));
        }
    }

    attrs.module = module.ok_or_else(|| {
        syn::Error::new(
            proc_macro2::Span::call_site(),
            "entity requires: #[entity(module = \"...\")]",
        )
    })?;
    Ok(attrs)
}
