use std::str::FromStr;
use std::sync::OnceLock;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::error::ModelError;

/// How money amounts are rounded to `money_scale` decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    /// Midpoint away from zero: 2.345 → 2.35, -2.345 → -2.35.
    #[default]
    HalfUp,
    /// Banker's rounding: 2.345 → 2.34, 2.355 → 2.36.
    HalfEven,
    /// Truncate toward zero.
    Down,
    /// Away from zero.
    Up,
}

impl Rounding {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::Down => RoundingStrategy::ToZero,
            Rounding::Up => RoundingStrategy::AwayFromZero,
        }
    }
}

impl FromStr for Rounding {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "half-up" => Ok(Rounding::HalfUp),
            "half-even" => Ok(Rounding::HalfEven),
            "down" => Ok(Rounding::Down),
            "up" => Ok(Rounding::Up),
            other => Err(ModelError::InvalidConfig(format!("unknown rounding: {other}"))),
        }
    }
}

/// Model-wide settings consulted by domain normalization overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    /// Decimal places kept on money amounts.
    pub money_scale: u32,

    /// Rounding applied when trimming money amounts to `money_scale`.
    pub rounding: Rounding,
}

impl Default for ModelConfig {
    fn default() -> Self {
        DEFAULT
    }
}

const DEFAULT: ModelConfig = ModelConfig {
    money_scale: 2,
    rounding: Rounding::HalfUp,
};

static INSTALLED: OnceLock<ModelConfig> = OnceLock::new();
static FALLBACK: ModelConfig = DEFAULT;

impl ModelConfig {
    /// Parse configuration from command-line arguments.
    ///
    /// Supported flags:
    /// - `--money-scale=N`
    /// - `--rounding=half-up|half-even|down|up`
    ///
    /// Unrecognized arguments are ignored so the flags can share an argument
    /// list with the host service.
    pub fn from_args(args: &[String]) -> Result<Self, ModelError> {
        let mut config = ModelConfig::default();

        for arg in args {
            if let Some(val) = arg.strip_prefix("--money-scale=") {
                config.money_scale = val
                    .parse()
                    .map_err(|_| ModelError::InvalidConfig(format!("bad money scale: {val}")))?;
            } else if let Some(val) = arg.strip_prefix("--rounding=") {
                config.rounding = val.parse()?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// `Decimal` carries at most 28 fractional digits.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.money_scale > 28 {
            return Err(ModelError::InvalidConfig(format!(
                "money scale {} exceeds 28",
                self.money_scale
            )));
        }
        Ok(())
    }

    /// Publish the process-wide config. Only the first install wins.
    pub fn install(self) -> Result<(), ModelError> {
        self.validate()?;
        INSTALLED
            .set(self)
            .map_err(|_| ModelError::ConfigAlreadyInstalled)
    }

    /// The installed config, or the default when none was installed.
    ///
    /// Reading never installs anything, so a later `install` still wins.
    pub fn current() -> &'static ModelConfig {
        INSTALLED.get().unwrap_or(&FALLBACK)
    }

    /// Round a money amount to the configured scale.
    pub fn round_money(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.money_scale, self.rounding.strategy())
    }
}
