//! Business platform entities: organizations, devices, invoices, payments
//! and orders, plus the small shared records they are built from.
//!
//! Every entity is declared with `#[entity]`, so it can be checked for
//! emptiness and normalized before it is validated or persisted:
//!
//! ```ignore
//! use bizmodel_types::{Emptyful, Normalizable};
//!
//! let mut order = Order::default();
//! order.note = Some("   ".into());
//! order.normalize();
//! assert!(order.is_empty());
//! ```

pub mod model;

pub use model::*;
