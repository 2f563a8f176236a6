use bizmodel_macro::entity;
use bizmodel_types::{ModelError, Timestamp};
use rust_decimal::Decimal;

use super::address::Address;
use super::info::Info;
use super::state::OrderState;

#[entity(module = "sales")]
pub struct OrderItem {
    pub product: Option<Info>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
}

impl OrderItem {
    pub fn total(&self) -> Result<Decimal, ModelError> {
        self.quantity
            .unwrap_or_default()
            .checked_mul(self.price.unwrap_or_default())
            .ok_or(ModelError::MoneyOverflow { field: "item" })
    }
}

/// A customer order taken by an organization.
#[entity(module = "sales", auditable, deletable)]
pub struct Order {
    pub id: Option<String>,
    pub number: Option<String>,
    #[property(owner)]
    pub organization_id: Option<String>,
    pub state: Option<OrderState>,
    pub customer: Option<Info>,
    pub items: Vec<OrderItem>,
    pub shipping_address: Option<Box<Address>>,
    pub note: Option<String>,
    pub placed_at: Option<Timestamp>,
}

impl Order {
    pub fn total(&self) -> Result<Decimal, ModelError> {
        self.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.total()?)
                .ok_or(ModelError::MoneyOverflow { field: "total" })
        })
    }

    /// Orders can be cancelled until they leave the warehouse.
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self.state,
            None | Some(OrderState::New | OrderState::Confirmed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizmodel_types::{Emptyful, Normalizable, normalize};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn blank_order_is_empty() {
        let mut order = Order {
            note: Some("   ".into()),
            ..Default::default()
        };
        order.normalize();
        assert!(order.is_empty());
        assert_eq!(order.note, None);
    }

    #[test]
    fn boxed_address_collapses() {
        let mut order = Order {
            number: Some("SO-1".into()),
            shipping_address: Some(Box::new(Address {
                street: Some(" ".into()),
                ..Default::default()
            })),
            ..Default::default()
        };
        order.normalize();
        assert_eq!(order.shipping_address, None);
        assert!(!order.is_empty());
    }

    #[test]
    fn list_with_one_empty_item_is_kept() {
        let mut order = Order {
            items: vec![OrderItem::default()],
            ..Default::default()
        };
        assert!(!order.is_empty());
        order.normalize();
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn totals() {
        let order = Order {
            items: vec![
                OrderItem {
                    quantity: Some(dec("3")),
                    price: Some(dec("2.50")),
                    ..Default::default()
                },
                OrderItem {
                    quantity: Some(dec("1")),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(order.total(), Ok(dec("7.50")));
    }

    #[test]
    fn overflowing_totals_are_errors() {
        let item = |quantity: Decimal, price: Decimal| OrderItem {
            quantity: Some(quantity),
            price: Some(price),
            ..Default::default()
        };
        let big = Order {
            items: vec![item(Decimal::MAX, dec("10"))],
            ..Default::default()
        };
        assert_eq!(big.total(), Err(ModelError::MoneyOverflow { field: "item" }));

        let many = Order {
            items: vec![item(Decimal::ONE, Decimal::MAX), item(Decimal::ONE, Decimal::ONE)],
            ..Default::default()
        };
        assert_eq!(many.total(), Err(ModelError::MoneyOverflow { field: "total" }));
    }

    #[test]
    fn cancellation() {
        let mut order = Order::default();
        assert!(order.is_cancellable());
        order.state = Some(OrderState::Shipped);
        assert!(!order.is_cancellable());
    }

    #[test]
    fn value_level_normalize() {
        let customer = Some(Info::new(" C-7 ", "  "));
        assert_eq!(
            normalize(customer),
            Some(Info {
                id: None,
                code: Some("C-7".into()),
                name: None,
            })
        );
        assert_eq!(normalize(Some(Order::default())), None);
    }
}
