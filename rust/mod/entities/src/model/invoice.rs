use bizmodel_macro::entity;
use bizmodel_types::ModelError;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::state::InvoiceState;

/// One billed line.
#[entity(module = "billing")]
pub struct InvoiceLine {
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
}

impl InvoiceLine {
    /// `quantity * unit_price`; a line missing either is worth nothing.
    pub fn amount(&self) -> Result<Decimal, ModelError> {
        match (self.quantity, self.unit_price) {
            (Some(q), Some(p)) => q
                .checked_mul(p)
                .ok_or(ModelError::MoneyOverflow { field: "amount" }),
            _ => Ok(Decimal::ZERO),
        }
    }
}

/// An invoice issued by an organization.
#[entity(module = "billing", auditable, deletable)]
pub struct Invoice {
    pub id: Option<String>,
    pub number: Option<String>,
    #[property(owner)]
    pub organization_id: Option<String>,
    pub state: Option<InvoiceState>,
    pub issued_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    pub lines: Vec<InvoiceLine>,
    /// Sum of line amounts, kept current by [`Invoice::recalculate_total`].
    #[property(computed)]
    pub total: Option<Decimal>,
}

impl Invoice {
    pub fn lines_total(&self) -> Result<Decimal, ModelError> {
        self.lines.iter().try_fold(Decimal::ZERO, |sum, line| {
            sum.checked_add(line.amount()?)
                .ok_or(ModelError::MoneyOverflow { field: "total" })
        })
    }

    /// On overflow the previous total is kept.
    pub fn recalculate_total(&mut self) -> Result<(), ModelError> {
        self.total = if self.lines.is_empty() {
            None
        } else {
            Some(self.lines_total()?)
        };
        Ok(())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        let open = matches!(
            self.state,
            Some(InvoiceState::Issued | InvoiceState::PartiallyPaid)
        );
        open && self.due_on.is_some_and(|due| due < today)
    }
}
