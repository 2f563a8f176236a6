//! Per-value-type emptiness and normalization rules.
//!
//! Both whole-object traversals walk an entity's properties and hand each
//! value to [`Value`]. The rules:
//!
//! | value                    | empty when            | normalized to                  |
//! |--------------------------|-----------------------|--------------------------------|
//! | `None`                   | always                | `None`                         |
//! | text                     | blank after stripping | stripped, absent if blank      |
//! | collection / map / array | length is zero        | absent if length is zero       |
//! | entity                   | its own `is_empty()`  | `normalize()`, absent if empty |
//! | anything else            | never                 | unchanged                      |
//!
//! Collections are never looked into: a `Vec` holding one empty entity is
//! not empty, and its elements are not normalized.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::text;

/// Whole-object emptiness in the business sense.
pub trait Emptyful {
    fn is_empty(&self) -> bool;
}

/// Whole-object normalization, in place.
pub trait Normalizable {
    fn normalize(&mut self);
}

/// What the owner of a value should do after normalizing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The value carries content.
    Keep,
    /// The value reduced to nothing. `Option` owners reset to `None`;
    /// other owners are left holding the empty form.
    Clear,
}

impl Outcome {
    pub fn is_clear(self) -> bool {
        self == Outcome::Clear
    }

    fn from_empty(empty: bool) -> Self {
        if empty { Outcome::Clear } else { Outcome::Keep }
    }
}

/// Emptiness and normalization rules for one value type.
///
/// Object-safe: property getters hand values out as `&dyn Value`.
pub trait Value {
    /// Emptiness predicate. Never mutates.
    fn is_empty_value(&self) -> bool;

    /// Normalize in place and report whether the value is now absent.
    fn normalize_value(&mut self) -> Outcome;
}

/// Emptiness predicate over an optional value.
pub fn is_empty<V: Value + ?Sized>(value: Option<&V>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_empty_value(),
    }
}

/// Normalize an optional value, returning `None` when it reduces to nothing.
pub fn normalize<V: Value>(value: Option<V>) -> Option<V> {
    let mut value = value?;
    match value.normalize_value() {
        Outcome::Keep => Some(value),
        Outcome::Clear => None,
    }
}

impl Value for String {
    fn is_empty_value(&self) -> bool {
        text::is_blank(self)
    }

    fn normalize_value(&mut self) -> Outcome {
        text::strip_in_place(self);
        Outcome::from_empty(self.is_empty())
    }
}

impl<T: Value> Value for Option<T> {
    fn is_empty_value(&self) -> bool {
        is_empty(self.as_ref())
    }

    fn normalize_value(&mut self) -> Outcome {
        let clear = match self {
            Some(v) => v.normalize_value().is_clear(),
            None => true,
        };
        if clear {
            *self = None;
        }
        Outcome::from_empty(clear)
    }
}

impl<T: Value + ?Sized> Value for Box<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }

    fn normalize_value(&mut self) -> Outcome {
        (**self).normalize_value()
    }
}

impl<T> Value for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn normalize_value(&mut self) -> Outcome {
        Outcome::from_empty(self.is_empty())
    }
}

impl<T, const N: usize> Value for [T; N] {
    fn is_empty_value(&self) -> bool {
        N == 0
    }

    fn normalize_value(&mut self) -> Outcome {
        Outcome::from_empty(N == 0)
    }
}

macro_rules! sized_value {
    ($($ty:ident<$($g:ident),+>),* $(,)?) => {$(
        impl<$($g),+> Value for $ty<$($g),+> {
            fn is_empty_value(&self) -> bool {
                self.is_empty()
            }

            fn normalize_value(&mut self) -> Outcome {
                Outcome::from_empty(self.is_empty())
            }
        }
    )*};
}

sized_value!(
    Vec<T>,
    VecDeque<T>,
    BTreeSet<T>,
    HashSet<T, S>,
    BTreeMap<K, V>,
    HashMap<K, V, S>,
);

/// Values that are never empty and that normalization leaves alone.
macro_rules! opaque_value {
    ($($ty:ty),* $(,)?) => {$(
        impl Value for $ty {
            fn is_empty_value(&self) -> bool {
                false
            }

            fn normalize_value(&mut self) -> Outcome {
                Outcome::Keep
            }
        }
    )*};
}

opaque_value!(
    bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    rust_decimal::Decimal,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
);
