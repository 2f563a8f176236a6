use bizmodel_macro::entity;
use bizmodel_types::{ModelConfig, ModelError, Normalizable, normalize_by_properties};
use rust_decimal::Decimal;
use tracing::debug;

use super::info::Info;
use super::state::PaymentState;

/// A payment against an invoice.
///
/// `amount` is what is due; `cash`, `card` and `transfer` are what was
/// tendered, and `change` is handed back out of the cash.
#[entity(module = "billing", auditable, custom_normalize)]
pub struct Payment {
    pub id: Option<String>,
    #[property(owner)]
    pub invoice_id: Option<String>,
    pub state: Option<PaymentState>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    pub amount: Option<Decimal>,
    pub cash: Option<Decimal>,
    pub card: Option<Decimal>,
    pub transfer: Option<Decimal>,
    pub change: Option<Decimal>,
    pub payer: Option<Info>,
    pub note: Option<String>,
}

impl Payment {
    /// Money actually kept: all tenders minus change. Absent parts count as zero.
    pub fn calculate_paid(&self) -> Result<Decimal, ModelError> {
        let overflow = || ModelError::MoneyOverflow { field: "paid" };
        let tendered = [self.cash, self.card, self.transfer]
            .into_iter()
            .flatten()
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .ok_or_else(overflow)?;
        tendered
            .checked_sub(self.change.unwrap_or_default())
            .ok_or_else(overflow)
    }

    /// Check that the tenders reconcile with the amount due.
    pub fn check_money(&self) -> Result<(), ModelError> {
        let amount = self.amount.ok_or(ModelError::MissingAmount)?;

        let parts = [
            ("amount", Some(amount)),
            ("cash", self.cash),
            ("card", self.card),
            ("transfer", self.transfer),
            ("change", self.change),
        ];
        for (field, value) in parts {
            if value.is_some_and(|v| v.is_sign_negative() && !v.is_zero()) {
                return Err(ModelError::NegativeAmount { field });
            }
        }

        if self.change.unwrap_or_default() > self.cash.unwrap_or_default() {
            return Err(ModelError::ChangeExceedsCash);
        }

        let paid = self.calculate_paid()?;
        if paid != amount {
            return Err(ModelError::MoneyMismatch { amount, paid });
        }
        Ok(())
    }

    pub fn is_money_valid(&self) -> bool {
        self.check_money().is_ok()
    }

    fn money_fields(&mut self) -> [(&'static str, &mut Option<Decimal>); 5] {
        [
            ("amount", &mut self.amount),
            ("cash", &mut self.cash),
            ("card", &mut self.card),
            ("transfer", &mut self.transfer),
            ("change", &mut self.change),
        ]
    }
}

impl Normalizable for Payment {
    /// Default property normalization, then money rounded to the configured
    /// scale.
    fn normalize(&mut self) {
        normalize_by_properties(self);

        let config = ModelConfig::current();
        for (field, value) in self.money_fields() {
            if let Some(v) = *value {
                let rounded = config.round_money(v);
                if rounded != v || rounded.scale() != v.scale() {
                    debug!(field, from = %v, to = %rounded, "rounded payment amount");
                }
                *value = Some(rounded);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizmodel_types::{Emptyful, Owned};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn payment(amount: &str) -> Payment {
        Payment {
            amount: Some(dec(amount)),
            ..Default::default()
        }
    }

    #[test]
    fn paid_sums_tenders_minus_change() {
        let p = Payment {
            cash: Some(dec("50")),
            card: Some(dec("20.25")),
            change: Some(dec("5.25")),
            ..payment("65")
        };
        assert_eq!(p.calculate_paid(), Ok(dec("65")));
        assert!(p.is_money_valid());
    }

    #[test]
    fn nothing_tendered_pays_nothing() {
        assert_eq!(Payment::default().calculate_paid(), Ok(Decimal::ZERO));
        assert_eq!(payment("0").check_money(), Ok(()));
    }

    #[test]
    fn missing_amount() {
        let p = Payment {
            cash: Some(dec("10")),
            ..Default::default()
        };
        assert_eq!(p.check_money(), Err(ModelError::MissingAmount));
        assert!(!p.is_money_valid());
    }

    #[test]
    fn negative_parts() {
        let p = Payment {
            card: Some(dec("-1")),
            ..payment("10")
        };
        assert_eq!(p.check_money(), Err(ModelError::NegativeAmount { field: "card" }));

        assert_eq!(
            payment("-5").check_money(),
            Err(ModelError::NegativeAmount { field: "amount" })
        );
    }

    #[test]
    fn change_comes_out_of_cash() {
        let p = Payment {
            card: Some(dec("20")),
            change: Some(dec("10")),
            ..payment("10")
        };
        assert_eq!(p.check_money(), Err(ModelError::ChangeExceedsCash));
    }

    #[test]
    fn mismatch() {
        let p = Payment {
            transfer: Some(dec("9.99")),
            ..payment("10")
        };
        assert_eq!(
            p.check_money(),
            Err(ModelError::MoneyMismatch {
                amount: dec("10"),
                paid: dec("9.99"),
            })
        );
    }

    #[test]
    fn overflowing_tenders_are_invalid() {
        let p = Payment {
            amount: Some(Decimal::MAX),
            cash: Some(Decimal::MAX),
            card: Some(Decimal::ONE),
            ..Default::default()
        };
        let overflow = ModelError::MoneyOverflow { field: "paid" };
        assert_eq!(p.calculate_paid(), Err(overflow.clone()));
        assert_eq!(p.check_money(), Err(overflow));
        assert!(!p.is_money_valid());

        let exact = Payment {
            cash: Some(Decimal::MAX),
            ..payment("0")
        };
        assert_eq!(exact.calculate_paid(), Ok(Decimal::MAX));
    }

    #[test]
    fn normalize_rounds_money() {
        let mut p = Payment {
            cash: Some(dec("10.005")),
            card: Some(dec("0.004")),
            note: Some("  ".into()),
            ..payment("10.009")
        };
        p.normalize();
        assert_eq!(p.amount, Some(dec("10.01")));
        assert_eq!(p.cash, Some(dec("10.01")));
        assert_eq!(p.card, Some(dec("0.00")));
        assert_eq!(p.note, None);
        assert!(p.is_money_valid());
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut p = Payment {
            currency: Some(" EUR ".into()),
            cash: Some(dec("3.14159")),
            ..payment("3.14159")
        };
        p.normalize();
        let once = p.clone();
        p.normalize();
        assert_eq!(p, once);
        assert_eq!(p.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn empty_payer_is_cleared() {
        let mut p = Payment {
            payer: Some(Info {
                name: Some(" ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(p.is_empty());
        p.normalize();
        assert_eq!(p.payer, None);
        assert!(p.is_empty());
    }

    #[test]
    fn owner_is_invoice() {
        let p = Payment {
            invoice_id: Some("inv-1".into()),
            ..Default::default()
        };
        assert_eq!(p.owner_id().map(String::as_str), Some("inv-1"));
    }
}
