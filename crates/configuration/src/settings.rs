use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub journal: Journal,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

/// Where the journal snapshot lives when the CLI is not told otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct Journal {
    /// Default journal file, JSON or CSV by extension.
    pub file: String,
}

impl Default for Journal {
    fn default() -> Self {
        Self {
            file: "journal.csv".to_string(),
        }
    }
}

/// Tunables for the analytics engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// Annualized risk-free rate used by the Sharpe ratio.
    /// 0.02 corresponds to 2%.
    pub risk_free_rate: Decimal,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: dec!(0.02),
        }
    }
}
