use bizmodel_macro::entity;

use super::geo::Coordinate;

/// Postal address, optionally pinned to a location.
#[entity(module = "core")]
pub struct Address {
    /// ISO 3166-1 alpha-2 country code.
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub location: Option<Coordinate>,
}

/// A person to reach at an organization.
#[entity(module = "party")]
pub struct Contact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizmodel_types::{Emptyful, Normalizable};

    #[test]
    fn empty_location_collapses_to_none() {
        let mut address = Address {
            city: Some(" Berlin ".into()),
            location: Some(Coordinate::default()),
            ..Default::default()
        };
        address.normalize();
        assert_eq!(address.city.as_deref(), Some("Berlin"));
        assert_eq!(address.location, None);
    }

    #[test]
    fn nested_location_is_normalized() {
        let mut address = Address {
            location: Some(Coordinate::new(0.0, 200.0)),
            ..Default::default()
        };
        address.normalize();
        assert_eq!(address.location, Some(Coordinate::new(0.0, -160.0)));
        assert!(!address.is_empty());
    }

    #[test]
    fn blank_address_is_empty() {
        let address = Address {
            street: Some("   ".into()),
            location: Some(Coordinate::default()),
            ..Default::default()
        };
        assert!(address.is_empty());
    }

    #[test]
    fn serde_field_names() {
        let contact = Contact {
            name: Some("Ada".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["name"], "Ada");

        let address: Address = serde_json::from_str(r#"{"postalCode":"10115"}"#).unwrap();
        assert_eq!(address.postal_code.as_deref(), Some("10115"));
    }
}
