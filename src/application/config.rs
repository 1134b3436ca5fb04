use crate::domain::{DEFAULT_CURRENCY, SettlementMode};

/// Session settings, filled in from command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Symbol appended to every rendered amount
    pub currency: String,
    /// How a split combines with the friend's previous balance
    pub mode: SettlementMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            mode: SettlementMode::Replace,
        }
    }
}

impl Config {
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_mode(mut self, mode: SettlementMode) -> Self {
        self.mode = mode;
        self
    }
}
