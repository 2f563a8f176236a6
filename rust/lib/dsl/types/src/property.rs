//! Property descriptors.
//!
//! `#[entity]` emits one `static` descriptor array per entity type, in field
//! declaration order. Descriptors are plain data: a name, flags, and two
//! function pointers that borrow the field as a [`Value`].

use std::fmt;

use crate::value::Value;

/// Borrow a property's value.
pub type Getter<T> = for<'a> fn(&'a T) -> &'a dyn Value;

/// Borrow a property's value mutably. Writing through it replaces the value.
pub type Setter<T> = for<'a> fn(&'a mut T) -> &'a mut dyn Value;

/// Flags set with `#[property(...)]` or injected by the macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyFlags {
    /// Derived from other properties, not independently stored.
    pub computed: bool,
    /// Platform bookkeeping (audit and soft-delete stamps).
    pub builtin: bool,
    /// Never written by the normalizer.
    pub read_only: bool,
}

impl PropertyFlags {
    pub const STORED: Self = Self {
        computed: false,
        builtin: false,
        read_only: false,
    };
}

/// One introspectable property of `T`.
pub struct PropertyDescriptor<T: 'static> {
    name: &'static str,
    flags: PropertyFlags,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T: 'static> PropertyDescriptor<T> {
    pub const fn new(
        name: &'static str,
        flags: PropertyFlags,
        get: Getter<T>,
        set: Setter<T>,
    ) -> Self {
        Self {
            name,
            flags,
            get,
            set,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    pub fn value<'a>(&self, object: &'a T) -> &'a dyn Value {
        (self.get)(object)
    }

    pub fn value_mut<'a>(&self, object: &'a mut T) -> &'a mut dyn Value {
        (self.set)(object)
    }

    /// Visited by the emptiness traversal.
    pub fn is_inspected(&self) -> bool {
        !self.flags.computed && !self.flags.builtin
    }

    /// Visited by the normalizer.
    pub fn is_writable(&self) -> bool {
        self.is_inspected() && !self.flags.read_only
    }
}

impl<T: 'static> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .finish()
    }
}
