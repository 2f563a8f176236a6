use rust_decimal::Decimal;
use thiserror::Error;

/// Stable error code constants.
///
/// Callers match on these, never on the message text.
pub mod error_code {
    pub const UNKNOWN_VARIANT: &str = "UNKNOWN_VARIANT";
    pub const INVALID_COORDINATE: &str = "INVALID_COORDINATE";
    pub const MISSING_AMOUNT: &str = "MISSING_AMOUNT";
    pub const NEGATIVE_AMOUNT: &str = "NEGATIVE_AMOUNT";
    pub const CHANGE_EXCEEDS_CASH: &str = "CHANGE_EXCEEDS_CASH";
    pub const MONEY_MISMATCH: &str = "MONEY_MISMATCH";
    pub const MONEY_OVERFLOW: &str = "MONEY_OVERFLOW";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const CONFIG_ALREADY_INSTALLED: &str = "CONFIG_ALREADY_INSTALLED";
}

/// Errors raised by fallible model operations.
///
/// The emptiness and normalization traversals themselves never fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("unknown {enum_name} variant: {value}")]
    UnknownVariant {
        enum_name: &'static str,
        value: String,
    },

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("payment amount is missing")]
    MissingAmount,

    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },

    #[error("change exceeds the cash tendered")]
    ChangeExceedsCash,

    #[error("paid {paid} does not match amount {amount}")]
    MoneyMismatch { amount: Decimal, paid: Decimal },

    #[error("{field} overflows the decimal range")]
    MoneyOverflow { field: &'static str },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("model config is already installed")]
    ConfigAlreadyInstalled,
}

impl ModelError {
    /// Stable, machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::UnknownVariant { .. } => error_code::UNKNOWN_VARIANT,
            ModelError::InvalidCoordinate(_) => error_code::INVALID_COORDINATE,
            ModelError::MissingAmount => error_code::MISSING_AMOUNT,
            ModelError::NegativeAmount { .. } => error_code::NEGATIVE_AMOUNT,
            ModelError::ChangeExceedsCash => error_code::CHANGE_EXCEEDS_CASH,
            ModelError::MoneyMismatch { .. } => error_code::MONEY_MISMATCH,
            ModelError::MoneyOverflow { .. } => error_code::MONEY_OVERFLOW,
            ModelError::InvalidConfig(_) => error_code::INVALID_CONFIG,
            ModelError::ConfigAlreadyInstalled => error_code::CONFIG_ALREADY_INSTALLED,
        }
    }
}
