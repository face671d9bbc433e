use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Long,
    Short,
}

impl TradeType {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            TradeType::Long => TradeType::Short,
            TradeType::Short => TradeType::Long,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Long => write!(f, "LONG"),
            TradeType::Short => write!(f, "SHORT"),
        }
    }
}

impl FromStr for TradeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LONG" => Ok(TradeType::Long),
            "SHORT" => Ok(TradeType::Short),
            other => Err(CoreError::InvalidInput(
                "trade_type".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// The lifecycle state of a journal entry.
///
/// Only `Closed` trades enter return-based statistics; `Open` and `Cancelled`
/// entries are still counted by the journal-wide aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
    Cancelled,
}

impl TradeStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, TradeStatus::Closed)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "OPEN"),
            TradeStatus::Closed => write!(f, "CLOSED"),
            TradeStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl FromStr for TradeStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(TradeStatus::Open),
            "CLOSED" => Ok(TradeStatus::Closed),
            "CANCELLED" => Ok(TradeStatus::Cancelled),
            other => Err(CoreError::InvalidInput(
                "trade_status".to_string(),
                other.to_string(),
            )),
        }
    }
}
