use crate::enums::{TradeStatus, TradeType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single journal entry: one round-trip trade as logged by the user.
///
/// `profit_loss` is the ground truth for win/loss classification. It is
/// supplied by the caller, never re-derived from the price fields, so manual
/// adjustments (fees, partial fills) survive analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// The day the trade was taken. Primary ordering key.
    pub date: NaiveDate,
    /// Stock, forex pair, or asset name.
    pub symbol: String,
    pub trade_type: TradeType,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    /// Number of shares or lot size.
    pub quantity: u32,
    /// Defined stop loss. Zero means the level was not set.
    pub stop_loss: Decimal,
    /// Take profit level. Zero means the level was not set.
    pub target_price: Decimal,
    /// Reason for exiting the trade.
    #[serde(default)]
    pub exit_reason: String,
    /// Actual profit or loss amount, signed.
    pub profit_loss: Decimal,
    /// Profit or loss in percentage terms.
    pub percentage_gain_loss: Decimal,
    /// User-assigned strategy tag (open set, e.g. "BREAKOUT", "ORDER_BLOCK").
    pub setup_type: String,
    /// Confidence rating, 1-10.
    pub confidence_level: u8,
    pub trade_status: TradeStatus,
    /// Tie-break for trades logged on the same calendar date.
    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// A trade is winning iff it realized a strictly positive P&L.
    pub fn is_winning(&self) -> bool {
        self.profit_loss > Decimal::ZERO
    }

    /// A trade is losing iff it realized a strictly negative P&L.
    /// Break-even trades are neither winning nor losing.
    pub fn is_losing(&self) -> bool {
        self.profit_loss < Decimal::ZERO
    }

    /// The planned reward per unit of risk, rounded to 2 decimal places.
    ///
    /// Returns `None` when the entry, stop, or target level is unset (zero)
    /// or the stop sits exactly on the entry (zero risk).
    pub fn risk_reward_ratio(&self) -> Option<Decimal> {
        if self.entry_price.is_zero() || self.stop_loss.is_zero() || self.target_price.is_zero() {
            return None;
        }

        let (risk, reward) = match self.trade_type {
            TradeType::Long => (
                (self.entry_price - self.stop_loss).abs(),
                (self.target_price - self.entry_price).abs(),
            ),
            TradeType::Short => (
                (self.stop_loss - self.entry_price).abs(),
                (self.entry_price - self.target_price).abs(),
            ),
        };

        if risk.is_zero() {
            return None;
        }

        Some((reward / risk).round_dp(2))
    }
}
