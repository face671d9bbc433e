//! # Journal Analytics Engine
//!
//! This crate turns a user's chronological trade ledger into derived
//! performance statistics: counts and P&L aggregates, win/loss streaks,
//! Sharpe ratio, maximum drawdown, a per-symbol heatmap, and breakdowns by
//! confidence level and setup type.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. Every operation reads an immutable trade snapshot and
//!   allocates a fresh result; there is no caching and no incremental state,
//!   so independent callers may run any mix of computations concurrently.
//! - **Total Functions:** Degenerate inputs never error. An empty ledger
//!   yields zeroed aggregates, and metrics that need a minimum sample
//!   (Sharpe, drawdown) report `None` instead.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, DEFAULT_RISK_FREE_RATE};
pub use report::{
    ConfidenceBucket, DailyPerformance, DashboardStats, FavoriteSymbol, JournalReport,
    MaxDrawdown, MonthlyPerformance, PeriodSummary, SetupStats, StreakSummary, SymbolStats,
};
