//! Property introspection and the generic whole-object traversals.
//!
//! [`Introspect`] is implemented by `#[entity]`. The eligible property lists
//! for each type are computed on first use and kept in a process-wide cache:
//! a plan is built at most once per type and never changes afterwards.
//!
//! Traversals recurse as deep as the object graph is nested. Entities own
//! their children (`Option<Box<T>>`, `Vec<T>`), so a graph cannot be cyclic
//! and recursion always terminates.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::property::PropertyDescriptor;

/// Compile-time property listing for an entity type.
pub trait Introspect: Sized + 'static {
    /// Entity type name, for diagnostics.
    const TYPE_NAME: &'static str;

    /// All properties in declaration order, eligible or not.
    fn properties() -> &'static [PropertyDescriptor<Self>];
}

/// Indexes into `Introspect::properties()` for each traversal.
#[derive(Debug)]
struct Plan {
    inspected: Box<[usize]>,
    writable: Box<[usize]>,
}

impl Plan {
    fn build<T: Introspect>() -> Self {
        let props = T::properties();
        let pick = |keep: fn(&PropertyDescriptor<T>) -> bool| {
            props
                .iter()
                .enumerate()
                .filter(|(_, p)| keep(p))
                .map(|(i, _)| i)
                .collect::<Box<[usize]>>()
        };
        Self {
            inspected: pick(PropertyDescriptor::<T>::is_inspected),
            writable: pick(PropertyDescriptor::<T>::is_writable),
        }
    }
}

static PLANS: OnceLock<RwLock<HashMap<TypeId, &'static Plan>>> = OnceLock::new();

fn plan<T: Introspect>() -> &'static Plan {
    let plans = PLANS.get_or_init(Default::default);
    let key = TypeId::of::<T>();

    let cached = plans
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .copied();
    if let Some(plan) = cached {
        return plan;
    }

    let mut plans = plans.write().unwrap_or_else(PoisonError::into_inner);
    *plans.entry(key).or_insert_with(|| {
        let plan = Plan::build::<T>();
        debug!(
            entity = T::TYPE_NAME,
            properties = T::properties().len(),
            inspected = plan.inspected.len(),
            writable = plan.writable.len(),
            "cached property plan"
        );
        let plan: &'static Plan = Box::leak(Box::new(plan));
        plan
    })
}

/// Properties visited by the emptiness traversal: everything except
/// computed and built-in properties, in declaration order.
pub fn inspected_properties<T: Introspect>() -> impl Iterator<Item = &'static PropertyDescriptor<T>> {
    let props = T::properties();
    plan::<T>().inspected.iter().map(move |&i| &props[i])
}

/// Properties visited by the normalizer: the inspected ones minus
/// read-only properties.
pub fn writable_properties<T: Introspect>() -> impl Iterator<Item = &'static PropertyDescriptor<T>> {
    let props = T::properties();
    plan::<T>().writable.iter().map(move |&i| &props[i])
}

/// Default `Emptyful::is_empty`: true iff every inspected property is empty.
/// Stops at the first non-empty property.
pub fn is_empty_by_properties<T: Introspect>(object: &T) -> bool {
    inspected_properties::<T>().all(|p| p.value(object).is_empty_value())
}

/// Default `Normalizable::normalize`: normalize every writable property in
/// place. Optional properties that reduce to nothing become `None`.
pub fn normalize_by_properties<T: Introspect>(object: &mut T) {
    for p in writable_properties::<T>() {
        if p.value_mut(object).normalize_value().is_clear() {
            trace!(entity = T::TYPE_NAME, property = p.name(), "cleared empty property");
        }
    }
}
