use bizmodel_macro::entity;

use super::address::{Address, Contact};
use super::state::OrganizationState;

/// A company or a branch of one. Branches point at their parent.
#[entity(module = "party", auditable, deletable)]
pub struct Organization {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub tax_number: Option<String>,
    #[property(owner)]
    pub parent_id: Option<String>,
    pub state: Option<OrganizationState>,
    pub address: Option<Address>,
    pub contacts: Vec<Contact>,
}

impl Organization {
    pub fn is_branch(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizmodel_types::{
        Assign, Auditable, Deletable, Emptyful, Introspect, Normalizable, Owned, Stateful,
    };
    use chrono::{TimeZone, Utc};

    #[test]
    fn stamps_are_builtin() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut org = Organization::default();
        org.stamp_create(at);
        org.mark_deleted(at);
        // Bookkeeping alone does not make an organization non-empty.
        assert!(org.is_empty());

        let flagged: Vec<_> = Organization::properties()
            .iter()
            .filter(|p| p.flags().builtin)
            .map(|p| p.name())
            .collect();
        assert_eq!(flagged, ["created_at", "modified_at", "deleted_at"]);
    }

    #[test]
    fn contacts_are_not_looked_into() {
        let mut org = Organization {
            contacts: vec![Contact {
                name: Some("  ".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(!org.is_empty());
        org.normalize();
        assert_eq!(org.contacts.len(), 1);
        assert_eq!(org.contacts[0].name.as_deref(), Some("  "));
    }

    #[test]
    fn blank_address_is_cleared() {
        let mut org = Organization {
            name: Some(" Acme GmbH ".into()),
            address: Some(Address {
                city: Some("\t".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        org.normalize();
        assert_eq!(org.name.as_deref(), Some("Acme GmbH"));
        assert_eq!(org.address, None);
    }

    #[test]
    fn markers() {
        let mut org = Organization {
            parent_id: Some("org-root".into()),
            ..Default::default()
        };
        assert!(org.is_branch());
        assert_eq!(org.owner_id().map(String::as_str), Some("org-root"));

        assert_eq!(org.state(), None);
        org.set_state(Some(OrganizationState::Suspended));
        assert!(org.is_in(OrganizationState::Suspended));
    }

    #[test]
    fn assign_keeps_identity_and_history() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut target = Organization {
            id: Some("org-1".into()),
            name: Some("Old".into()),
            ..Default::default()
        };
        target.stamp_create(at);

        let source = Organization {
            id: Some("org-2".into()),
            name: Some("New".into()),
            tax_number: Some("DE123".into()),
            contacts: vec![Contact::default()],
            ..Default::default()
        };
        target.assign(&source);

        assert_eq!(target.id.as_deref(), Some("org-1"));
        assert_eq!(target.name.as_deref(), Some("New"));
        assert_eq!(target.tax_number.as_deref(), Some("DE123"));
        assert_eq!(target.contacts.len(), 1);
        assert_eq!(target.created_at, Some(at));
    }

    #[test]
    fn serde_omits_absent_stamps() {
        let org = Organization {
            tax_number: Some("DE123".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&org).unwrap();
        assert_eq!(json["taxNumber"], "DE123");
        assert!(json.get("createdAt").is_none());
        assert!(json.get("deletedAt").is_none());
    }
}
