use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Consecutive win/loss run lengths over the ledger.
///
/// At most one of `current_win`/`current_loss` is non-zero: a ledger whose
/// most recent trade lost cannot also be on a winning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_win: usize,
    pub current_loss: usize,
    pub max_win: usize,
    pub max_loss: usize,
}

/// The headline numbers for the journal dashboard.
///
/// Covers every trade regardless of status; break-even trades count toward
/// the totals but toward neither the winning nor the losing column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate_pct: Option<Decimal>, // Option<> for cases with 0 trades
    pub total_pnl: Decimal,
    /// Mean of the positive P&L amounts, zero when the ledger has no winners.
    pub avg_profit: Decimal,
    /// Mean of the negative P&L amounts (a negative number), zero when the
    /// ledger has no losers.
    pub avg_loss: Decimal,
    pub today_pnl: Decimal,
    pub today_trades: usize,
    pub week_pnl: Decimal,
    pub week_trades: usize,
    pub week_win_rate_pct: Decimal,
    pub streaks: StreakSummary,
}

impl DashboardStats {
    /// Creates a new, zeroed-out DashboardStats.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate_pct: None,
            total_pnl: Decimal::ZERO,
            avg_profit: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            today_pnl: Decimal::ZERO,
            today_trades: 0,
            week_pnl: Decimal::ZERO,
            week_trades: 0,
            week_win_rate_pct: Decimal::ZERO,
            streaks: StreakSummary::default(),
        }
    }
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self::new()
    }
}

/// The largest decline from a running cumulative-P&L peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaxDrawdown {
    /// Decline expressed as a percentage of the peak, in [0, 100].
    PercentOfPeak(Decimal),
    /// Raw decline, reported when the cumulative P&L never rose above zero.
    Absolute(Decimal),
}

impl MaxDrawdown {
    pub fn value(&self) -> Decimal {
        match self {
            MaxDrawdown::PercentOfPeak(v) | MaxDrawdown::Absolute(v) => *v,
        }
    }
}

/// Aggregated performance for one instrument over the heatmap window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolStats {
    pub symbol: String,
    pub trades: usize,
    pub wins: usize,
    pub win_rate_pct: Decimal,
    pub total_pnl: Decimal,
    pub avg_confidence: Decimal,
    pub avg_pnl: Decimal,
}

/// Performance bucketed by the user's 1-10 confidence rating.
///
/// Every level is present in the output; levels with no trades are
/// zero-filled rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBucket {
    pub level: u8,
    pub trades: usize,
    pub wins: usize,
    pub win_rate_pct: Decimal,
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub avg_win: Decimal,
    pub avg_loss: Decimal,
}

impl ConfidenceBucket {
    /// A zero-filled bucket for a level the ledger never used.
    pub fn empty(level: u8) -> Self {
        Self {
            level,
            trades: 0,
            wins: 0,
            win_rate_pct: Decimal::ZERO,
            total_pnl: Decimal::ZERO,
            avg_pnl: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
        }
    }
}

/// Aggregated performance for one setup tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupStats {
    pub setup_type: String,
    pub trades: usize,
    pub win_rate_pct: Decimal,
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
}

/// Trade count and P&L for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub trades: usize,
    pub total_pnl: Decimal,
}

/// Trade count and P&L for a calendar month ("YYYY-MM").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub month: String,
    pub trades: usize,
    pub total_pnl: Decimal,
}

/// An instrument ranked by how often it was traded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteSymbol {
    pub symbol: String,
    pub trades: usize,
}

/// Review metrics for an inclusive date range (weekly or monthly reviews).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub total_pnl: Decimal,
    pub win_rate_pct: Decimal,
    /// Raw peak-to-trough decline within the period, never a percentage.
    pub max_drawdown: Decimal,
}

/// The full analytics output for one ledger snapshot.
///
/// This struct is the final product of the `AnalyticsEngine` and serves as
/// the data transfer object for journal statistics throughout the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalReport {
    pub dashboard: DashboardStats,
    pub average_risk_reward: Option<Decimal>, // Option<> when no trade defines both levels
    pub sharpe_ratio: Option<Decimal>,        // Option<> for small or flat return series
    pub max_drawdown: Option<MaxDrawdown>,    // Option<> when no trade has closed
    pub symbol_heatmap: Vec<SymbolStats>,
    pub confidence_levels: Vec<ConfidenceBucket>,
    pub setup_performance: Vec<SetupStats>,
    pub daily_performance: Vec<DailyPerformance>,
    pub monthly_performance: Vec<MonthlyPerformance>,
    pub favorite_symbols: Vec<FavoriteSymbol>,
}
