//! bizmodel core types.
//!
//! Everything an entity declared with `#[entity]` needs at runtime:
//!
//! - [`Value`]: per-value-type emptiness and normalization rules
//! - [`Emptyful`] / [`Normalizable`]: whole-object capabilities
//! - [`PropertyDescriptor`] / [`Introspect`]: the compile-time property list
//!   the macro generates in place of reflection
//! - [`introspect`]: the cached traversals behind the default capability impls
//! - [`markers`]: cross-cutting field contracts (audit stamps, soft delete, ...)
//!
//! ```ignore
//! #[entity(module = "core")]
//! pub struct Info {
//!     pub id: Option<String>,
//!     pub code: Option<String>,
//!     pub name: Option<String>,
//! }
//!
//! let mut info = Info { code: Some("  ".into()), ..Default::default() };
//! info.normalize();
//! assert!(info.code.is_none() && info.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod introspect;
pub mod markers;
pub mod property;
pub mod text;
pub mod value;

pub use config::{ModelConfig, Rounding};
pub use error::ModelError;
pub use introspect::{Introspect, is_empty_by_properties, normalize_by_properties};
pub use markers::{Assign, Auditable, Deletable, Identifiable, Owned, StateEnum, Stateful};
pub use property::{PropertyDescriptor, PropertyFlags};
pub use value::{Emptyful, Normalizable, Outcome, Value, is_empty, normalize};

pub use rust_decimal::Decimal;

/// Point in time used by audit and soft-delete stamps.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
