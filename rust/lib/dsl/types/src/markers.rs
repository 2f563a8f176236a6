//! Cross-cutting field contracts shared by entities.
//!
//! `#[entity]` implements these from field names and flags:
//! `id` → [`Identifiable`], `state` → [`Stateful`],
//! `#[property(owner)]` → [`Owned`], `auditable` → [`Auditable`],
//! `deletable` → [`Deletable`]. [`Assign`] is always implemented.

use std::fmt::Display;
use std::str::FromStr;

use crate::Timestamp;
use crate::error::ModelError;

/// Entity with an identity.
pub trait Identifiable {
    type Id;

    /// `None` until the entity has been assigned an identity.
    fn id(&self) -> Option<&Self::Id>;
}

/// Entity referencing the entity that owns it.
pub trait Owned {
    type OwnerId;

    fn owner_id(&self) -> Option<&Self::OwnerId>;
}

/// Entity carrying creation and modification stamps.
pub trait Auditable {
    fn created_at(&self) -> Option<&Timestamp>;
    fn modified_at(&self) -> Option<&Timestamp>;
    fn set_created_at(&mut self, at: Option<Timestamp>);
    fn set_modified_at(&mut self, at: Option<Timestamp>);

    /// Stamp a new entity: `created_at` if not already set, always `modified_at`.
    fn stamp_create(&mut self, now: Timestamp) {
        if self.created_at().is_none() {
            self.set_created_at(Some(now));
        }
        self.set_modified_at(Some(now));
    }

    /// Stamp a modification.
    fn stamp_update(&mut self, now: Timestamp) {
        self.set_modified_at(Some(now));
    }
}

/// Entity that is soft-deleted by stamping `deleted_at`.
pub trait Deletable {
    fn deleted_at(&self) -> Option<&Timestamp>;
    fn set_deleted_at(&mut self, at: Option<Timestamp>);

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Mark deleted. An entity already deleted keeps its original stamp.
    fn mark_deleted(&mut self, now: Timestamp) {
        if !self.is_deleted() {
            self.set_deleted_at(Some(now));
        }
    }

    fn restore(&mut self) {
        self.set_deleted_at(None);
    }
}

/// Enum declared with `#[state_enum]`.
pub trait StateEnum: Copy + Display + FromStr<Err = ModelError> + 'static {
    fn module() -> &'static str;
    fn enum_name() -> &'static str;
    /// Wire names (`SCREAMING_SNAKE_CASE`) in declaration order.
    fn variants() -> &'static [&'static str];
}

/// Entity moving through a state enum.
pub trait Stateful {
    type State: StateEnum;

    fn state(&self) -> Option<Self::State>;
    fn set_state(&mut self, state: Option<Self::State>);

    fn is_in(&self, state: Self::State) -> bool
    where
        Self::State: PartialEq,
    {
        self.state() == Some(state)
    }
}

/// Field-wise copy from another instance of the same type.
///
/// Copies every stored property except `id` and the built-in audit and
/// soft-delete stamps, so the receiver keeps its identity and history.
/// A full copy is `Clone`.
pub trait Assign {
    fn assign(&mut self, other: &Self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[derive(Default)]
    struct Record {
        created_at: Option<Timestamp>,
        modified_at: Option<Timestamp>,
        deleted_at: Option<Timestamp>,
    }

    impl Auditable for Record {
        fn created_at(&self) -> Option<&Timestamp> {
            self.created_at.as_ref()
        }
        fn modified_at(&self) -> Option<&Timestamp> {
            self.modified_at.as_ref()
        }
        fn set_created_at(&mut self, at: Option<Timestamp>) {
            self.created_at = at;
        }
        fn set_modified_at(&mut self, at: Option<Timestamp>) {
            self.modified_at = at;
        }
    }

    impl Deletable for Record {
        fn deleted_at(&self) -> Option<&Timestamp> {
            self.deleted_at.as_ref()
        }
        fn set_deleted_at(&mut self, at: Option<Timestamp>) {
            self.deleted_at = at;
        }
    }

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn stamp_create_keeps_existing_creation() {
        let mut r = Record::default();
        r.stamp_create(at(1));
        assert_eq!(r.created_at, Some(at(1)));
        assert_eq!(r.modified_at, Some(at(1)));

        r.stamp_create(at(2));
        assert_eq!(r.created_at, Some(at(1)));
        assert_eq!(r.modified_at, Some(at(2)));

        r.stamp_update(at(3));
        assert_eq!(r.created_at, Some(at(1)));
        assert_eq!(r.modified_at, Some(at(3)));
    }

    #[test]
    fn soft_delete_and_restore() {
        let mut r = Record::default();
        assert!(!r.is_deleted());
        r.mark_deleted(at(4));
        r.mark_deleted(at(5));
        assert_eq!(r.deleted_at, Some(at(4)));
        r.restore();
        assert!(!r.is_deleted());
    }
}
