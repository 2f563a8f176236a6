//! bizmodel proc macros.
//!
//! `#[entity(module = "billing")]` — defines an entity struct:
//!   - Adds Debug/Clone/Default/PartialEq and serde with camelCase
//!   - Generates the static property descriptor list (`Introspect`)
//!   - Implements `Emptyful`, `Normalizable`, `Value` and `Assign`
//!   - Implements `Identifiable`, `Stateful`, `Owned`, `Auditable`,
//!     `Deletable` where the fields and flags call for them
//!
//! `#[state_enum(module = "billing")]` — defines a state enum.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod entity;
mod state_enum;
mod util;

/// Define an entity.
///
/// ```ignore
/// #[entity(module = "billing", auditable, deletable)]
/// pub struct Invoice {
///     pub id: Option<String>,
///     pub number: Option<String>,
///     #[property(owner)]
///     pub organization_id: Option<String>,
///     pub state: Option<InvoiceState>,
///     pub lines: Vec<InvoiceLine>,
///     #[property(computed)]
///     pub total: Option<Decimal>,
///     // created_at, modified_at, deleted_at → injected
/// }
/// ```
///
/// Entity flags:
/// - `auditable` — injects `created_at` / `modified_at`, implements `Auditable`
/// - `deletable` — injects `deleted_at`, implements `Deletable`
/// - `custom_empty` — skip the generated `Emptyful` impl
/// - `custom_normalize` — skip the generated `Normalizable` impl
///
/// Field flags, `#[property(...)]`:
/// - `computed` — derived; ignored by both traversals
/// - `builtin` — platform bookkeeping; ignored by both traversals and by `assign`
/// - `read_only` — checked for emptiness, never normalized
/// - `owner` — reference to the owning entity (`Owned`)
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::ItemStruct);
    entity::expand(attr.into(), item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Define a state enum.
///
/// ```ignore
/// #[state_enum(module = "billing")]
/// pub enum InvoiceState {
///     Draft,
///     Issued,
///     Paid,
///     Cancelled,
/// }
/// ```
///
/// Generates serde (`SCREAMING_SNAKE_CASE`), `Display`, case-insensitive
/// `FromStr`, `Default` (first variant), `StateEnum` and an opaque `Value`.
#[proc_macro_attribute]
pub fn state_enum(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::ItemEnum);
    state_enum::expand(attr.into(), item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
