use crate::report::{
    ConfidenceBucket, DailyPerformance, DashboardStats, FavoriteSymbol, JournalReport,
    MaxDrawdown, MonthlyPerformance, PeriodSummary, SetupStats, StreakSummary, SymbolStats,
};
use chrono::{Datelike, Duration, NaiveDate};
use core_types::Trade;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tracing::debug;

/// Convention for annualizing a per-trade return series.
const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Lookback for the per-symbol heatmap, in days before the reference date.
const HEATMAP_WINDOW_DAYS: i64 = 30;

/// Annualized risk-free rate applied when the caller does not supply one.
pub const DEFAULT_RISK_FREE_RATE: Decimal = dec!(0.02);

/// A stateless calculator for deriving performance statistics from a trade
/// ledger.
///
/// Callers may pass the snapshot in any order; every operation that depends
/// on chronology re-orders internally by `(date, created_at)`.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the full report for one ledger snapshot.
    ///
    /// # Arguments
    ///
    /// * `trades` - The user's trade snapshot, in any order.
    /// * `as_of` - Reference date for "today", "this week", and the heatmap
    ///   window. Usually the caller's local calendar date.
    /// * `risk_free_rate` - Annualized risk-free rate for the Sharpe ratio.
    pub fn calculate(
        &self,
        trades: &[Trade],
        as_of: NaiveDate,
        risk_free_rate: Decimal,
    ) -> JournalReport {
        debug!(trades = trades.len(), %as_of, "calculating journal report");

        JournalReport {
            dashboard: self.dashboard_stats(trades, as_of),
            average_risk_reward: self.average_risk_reward(trades),
            sharpe_ratio: self.sharpe_ratio(trades, risk_free_rate),
            max_drawdown: self.max_drawdown(trades),
            symbol_heatmap: self.symbol_heatmap(trades, as_of),
            confidence_levels: self.confidence_performance(trades),
            setup_performance: self.setup_performance(trades),
            daily_performance: self.daily_performance(trades),
            monthly_performance: self.monthly_performance(trades),
            favorite_symbols: self.favorite_symbols(trades),
        }
    }

    /// Current and historical-maximum win/loss run lengths.
    pub fn streaks(&self, trades: &[Trade]) -> StreakSummary {
        let ordered = chronological(trades);

        // Current runs: walk back from the most recent trade until the run
        // breaks. A break-even trade matches neither arm and ends the scan,
        // so a flat most-recent trade leaves both counters at zero.
        let mut current_win = 0;
        let mut current_loss = 0;
        for trade in ordered.iter().rev() {
            if trade.is_winning() && current_loss == 0 {
                current_win += 1;
            } else if trade.is_losing() && current_win == 0 {
                current_loss += 1;
            } else {
                break;
            }
        }

        // Historical maxima: forward scan with running counters. Break-even
        // trades reset both runs.
        let mut max_win = 0;
        let mut max_loss = 0;
        let mut run_win = 0;
        let mut run_loss = 0;
        for trade in &ordered {
            if trade.is_winning() {
                run_win += 1;
                run_loss = 0;
                max_win = max_win.max(run_win);
            } else if trade.is_losing() {
                run_loss += 1;
                run_win = 0;
                max_loss = max_loss.max(run_loss);
            } else {
                run_win = 0;
                run_loss = 0;
            }
        }

        StreakSummary {
            current_win,
            current_loss,
            max_win,
            max_loss,
        }
    }

    /// Headline dashboard numbers over every trade in the ledger.
    pub fn dashboard_stats(&self, trades: &[Trade], as_of: NaiveDate) -> DashboardStats {
        let mut stats = DashboardStats::new();
        stats.total_trades = trades.len();
        stats.streaks = self.streaks(trades);

        let week_start = as_of - Duration::days(as_of.weekday().num_days_from_monday() as i64);

        let mut gross_profit = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;
        let mut week_wins = 0;

        for trade in trades {
            stats.total_pnl += trade.profit_loss;

            if trade.is_winning() {
                stats.winning_trades += 1;
                gross_profit += trade.profit_loss;
            } else if trade.is_losing() {
                stats.losing_trades += 1;
                gross_loss += trade.profit_loss;
            }

            if trade.date == as_of {
                stats.today_trades += 1;
                stats.today_pnl += trade.profit_loss;
            }

            if trade.date >= week_start && trade.date <= as_of {
                stats.week_trades += 1;
                stats.week_pnl += trade.profit_loss;
                if trade.is_winning() {
                    week_wins += 1;
                }
            }
        }

        if stats.total_trades > 0 {
            stats.win_rate_pct = Some(pct(stats.winning_trades, stats.total_trades));
        }
        if stats.winning_trades > 0 {
            stats.avg_profit = (gross_profit / Decimal::from(stats.winning_trades)).round_dp(2);
        }
        if stats.losing_trades > 0 {
            stats.avg_loss = (gross_loss / Decimal::from(stats.losing_trades)).round_dp(2);
        }
        if stats.week_trades > 0 {
            stats.week_win_rate_pct = pct(week_wins, stats.week_trades);
        }

        stats
    }

    /// Mean planned reward-per-unit-risk over trades where both levels are
    /// set, rounded to 2 decimal places. `None` when no trade qualifies.
    pub fn average_risk_reward(&self, trades: &[Trade]) -> Option<Decimal> {
        let ratios: Vec<Decimal> = trades.iter().filter_map(Trade::risk_reward_ratio).collect();
        if ratios.is_empty() {
            return None;
        }
        let sum: Decimal = ratios.iter().sum();
        Some((sum / Decimal::from(ratios.len())).round_dp(2))
    }

    /// Annualized Sharpe ratio over the closed trades' percentage returns.
    ///
    /// `None` with fewer than two closed trades or a flat return series.
    pub fn sharpe_ratio(&self, trades: &[Trade], risk_free_rate: Decimal) -> Option<Decimal> {
        let returns: Vec<Decimal> = chronological(trades)
            .into_iter()
            .filter(|t| t.trade_status.is_closed())
            .map(|t| t.percentage_gain_loss)
            .collect();

        if returns.len() < 2 {
            return None;
        }

        let n = Decimal::from(returns.len());
        let mean = returns.iter().sum::<Decimal>() / n;

        // Sample standard deviation (n - 1 denominator).
        let variance = returns
            .iter()
            .map(|r| (*r - mean) * (*r - mean))
            .sum::<Decimal>()
            / (n - Decimal::ONE);
        let std_dev = variance.sqrt()?;
        if std_dev.is_zero() {
            return None;
        }

        let trading_days = Decimal::from(TRADING_DAYS_PER_YEAR);
        let annualized_return = mean * trading_days;
        let annualized_std = std_dev * trading_days.sqrt()?;

        Some(((annualized_return - risk_free_rate) / annualized_std).round_dp(4))
    }

    /// Largest decline from the running cumulative-P&L peak over the closed
    /// trades, oldest first. `None` when no trade has closed.
    ///
    /// The peak starts at zero, so a ledger that never went positive reports
    /// a raw decline instead of a percentage of a zero peak.
    pub fn max_drawdown(&self, trades: &[Trade]) -> Option<MaxDrawdown> {
        let closed: Vec<&Trade> = chronological(trades)
            .into_iter()
            .filter(|t| t.trade_status.is_closed())
            .collect();
        if closed.is_empty() {
            return None;
        }

        let mut cumulative = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut max_dd = Decimal::ZERO;
        for trade in closed {
            cumulative += trade.profit_loss;
            if cumulative > peak {
                peak = cumulative;
            }
            let drawdown = peak - cumulative;
            if drawdown > max_dd {
                max_dd = drawdown;
            }
        }

        if peak > Decimal::ZERO {
            Some(MaxDrawdown::PercentOfPeak(
                (max_dd / peak * Decimal::from(100)).round_dp(2),
            ))
        } else {
            Some(MaxDrawdown::Absolute(max_dd.round_dp(2)))
        }
    }

    /// Per-symbol performance over closed trades inside the lookback window,
    /// sorted by total P&L descending.
    pub fn symbol_heatmap(&self, trades: &[Trade], as_of: NaiveDate) -> Vec<SymbolStats> {
        let cutoff = as_of - Duration::days(HEATMAP_WINDOW_DAYS);

        let mut by_symbol: BTreeMap<&str, Vec<&Trade>> = BTreeMap::new();
        for trade in trades {
            if trade.trade_status.is_closed() && trade.date >= cutoff {
                by_symbol.entry(trade.symbol.as_str()).or_default().push(trade);
            }
        }

        let mut rows: Vec<SymbolStats> = by_symbol
            .into_iter()
            .map(|(symbol, group)| {
                let count = group.len();
                let wins = group.iter().filter(|t| t.is_winning()).count();
                let total_pnl: Decimal = group.iter().map(|t| t.profit_loss).sum();
                let confidence_sum: Decimal = group
                    .iter()
                    .map(|t| Decimal::from(t.confidence_level))
                    .sum();

                SymbolStats {
                    symbol: symbol.to_string(),
                    trades: count,
                    wins,
                    win_rate_pct: pct(wins, count),
                    total_pnl: total_pnl.round_dp(2),
                    avg_confidence: (confidence_sum / Decimal::from(count)).round_dp(2),
                    avg_pnl: (total_pnl / Decimal::from(count)).round_dp(2),
                }
            })
            .collect();

        // Grouping through a BTreeMap plus a stable sort keeps equal-P&L
        // symbols in alphabetical order.
        rows.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
        rows
    }

    /// Closed-trade performance bucketed by confidence level. The output
    /// always holds exactly ten entries, levels 1 through 10.
    pub fn confidence_performance(&self, trades: &[Trade]) -> Vec<ConfidenceBucket> {
        (1..=10u8)
            .map(|level| {
                let group: Vec<&Trade> = trades
                    .iter()
                    .filter(|t| t.trade_status.is_closed() && t.confidence_level == level)
                    .collect();
                let count = group.len();
                if count == 0 {
                    return ConfidenceBucket::empty(level);
                }

                let wins = group.iter().filter(|t| t.is_winning()).count();
                let losses = group.iter().filter(|t| t.is_losing()).count();
                let total_pnl: Decimal = group.iter().map(|t| t.profit_loss).sum();
                let win_sum: Decimal = group
                    .iter()
                    .filter(|t| t.is_winning())
                    .map(|t| t.profit_loss)
                    .sum();
                let loss_sum: Decimal = group
                    .iter()
                    .filter(|t| t.is_losing())
                    .map(|t| t.profit_loss)
                    .sum();

                ConfidenceBucket {
                    level,
                    trades: count,
                    wins,
                    win_rate_pct: pct(wins, count),
                    total_pnl: total_pnl.round_dp(2),
                    avg_pnl: (total_pnl / Decimal::from(count)).round_dp(2),
                    avg_win: if wins > 0 {
                        (win_sum / Decimal::from(wins)).round_dp(2)
                    } else {
                        Decimal::ZERO
                    },
                    avg_loss: if losses > 0 {
                        (loss_sum / Decimal::from(losses)).round_dp(2)
                    } else {
                        Decimal::ZERO
                    },
                }
            })
            .collect()
    }

    /// Performance grouped by setup tag over the whole ledger, sorted by
    /// total P&L descending.
    pub fn setup_performance(&self, trades: &[Trade]) -> Vec<SetupStats> {
        let mut by_setup: BTreeMap<&str, Vec<&Trade>> = BTreeMap::new();
        for trade in trades {
            by_setup.entry(trade.setup_type.as_str()).or_default().push(trade);
        }

        let mut rows: Vec<SetupStats> = by_setup
            .into_iter()
            .map(|(setup, group)| {
                let count = group.len();
                let wins = group.iter().filter(|t| t.is_winning()).count();
                let total_pnl: Decimal = group.iter().map(|t| t.profit_loss).sum();

                SetupStats {
                    setup_type: setup.to_string(),
                    trades: count,
                    win_rate_pct: pct(wins, count),
                    total_pnl: total_pnl.round_dp(2),
                    avg_pnl: (total_pnl / Decimal::from(count)).round_dp(2),
                }
            })
            .collect();

        rows.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
        rows
    }

    /// Per-day trade count and P&L, most recent 30 distinct days first.
    pub fn daily_performance(&self, trades: &[Trade]) -> Vec<DailyPerformance> {
        let mut by_date: BTreeMap<NaiveDate, (usize, Decimal)> = BTreeMap::new();
        for trade in trades {
            let entry = by_date.entry(trade.date).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += trade.profit_loss;
        }

        by_date
            .into_iter()
            .rev()
            .take(30)
            .map(|(date, (count, total_pnl))| DailyPerformance {
                date,
                trades: count,
                total_pnl,
            })
            .collect()
    }

    /// Closed-trade P&L grouped by calendar month, oldest first.
    pub fn monthly_performance(&self, trades: &[Trade]) -> Vec<MonthlyPerformance> {
        let mut by_month: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
        for trade in trades.iter().filter(|t| t.trade_status.is_closed()) {
            let month = trade.date.format("%Y-%m").to_string();
            let entry = by_month.entry(month).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += trade.profit_loss;
        }

        by_month
            .into_iter()
            .map(|(month, (count, total_pnl))| MonthlyPerformance {
                month,
                trades: count,
                total_pnl,
            })
            .collect()
    }

    /// The ten most-traded instruments, busiest first.
    pub fn favorite_symbols(&self, trades: &[Trade]) -> Vec<FavoriteSymbol> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for trade in trades {
            *counts.entry(trade.symbol.as_str()).or_default() += 1;
        }

        let mut rows: Vec<FavoriteSymbol> = counts
            .into_iter()
            .map(|(symbol, count)| FavoriteSymbol {
                symbol: symbol.to_string(),
                trades: count,
            })
            .collect();

        rows.sort_by(|a, b| b.trades.cmp(&a.trades));
        rows.truncate(10);
        rows
    }

    /// Review metrics over an inclusive date range, for weekly and monthly
    /// write-ups. The drawdown here is the raw decline, never a percentage.
    pub fn period_summary(
        &self,
        trades: &[Trade],
        start: NaiveDate,
        end: NaiveDate,
    ) -> PeriodSummary {
        let in_period: Vec<&Trade> = chronological(trades)
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect();

        let total_trades = in_period.len();
        let winning_trades = in_period.iter().filter(|t| t.is_winning()).count();
        let losing_trades = in_period.iter().filter(|t| t.is_losing()).count();
        let total_pnl: Decimal = in_period.iter().map(|t| t.profit_loss).sum();

        let mut cumulative = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut max_dd = Decimal::ZERO;
        for trade in &in_period {
            cumulative += trade.profit_loss;
            if cumulative > peak {
                peak = cumulative;
            }
            let drawdown = peak - cumulative;
            if drawdown > max_dd {
                max_dd = drawdown;
            }
        }

        PeriodSummary {
            start,
            end,
            total_trades,
            winning_trades,
            losing_trades,
            total_pnl,
            win_rate_pct: if total_trades > 0 {
                pct(winning_trades, total_trades)
            } else {
                Decimal::ZERO
            },
            max_drawdown: max_dd.round_dp(2),
        }
    }
}

/// Trades sorted oldest first by `(date, created_at)`.
fn chronological(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| (t.date, t.created_at));
    sorted
}

/// `part / whole * 100`, rounded to 2 decimal places. Callers guard
/// `whole > 0`.
fn pct(part: usize, whole: usize) -> Decimal {
    ((Decimal::from(part) / Decimal::from(whole)) * Decimal::from(100)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{TradeStatus, TradeType};
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn trade(date: NaiveDate, pnl: Decimal) -> Trade {
        Trade {
            id: Uuid::new_v4(),
            date,
            symbol: "EURUSD".to_string(),
            trade_type: TradeType::Long,
            entry_price: dec!(100),
            exit_price: dec!(101),
            quantity: 1,
            stop_loss: dec!(95),
            target_price: dec!(110),
            exit_reason: String::new(),
            profit_loss: pnl,
            percentage_gain_loss: pnl / dec!(10),
            setup_type: "BREAKOUT".to_string(),
            confidence_level: 5,
            trade_status: TradeStatus::Closed,
            created_at: date.and_hms_opt(12, 0, 0).unwrap().and_utc(),
        }
    }

    /// Chronological P&L sequence, one trade per day starting June 1st.
    fn ledger(pnls: &[Decimal]) -> Vec<Trade> {
        pnls.iter()
            .enumerate()
            .map(|(i, pnl)| trade(day(i as u32 + 1), *pnl))
            .collect()
    }

    #[test]
    fn recent_loss_ends_the_win_streak() {
        let trades = ledger(&[dec!(100), dec!(50), dec!(-30), dec!(20), dec!(-10)]);
        let streaks = AnalyticsEngine::new().streaks(&trades);
        assert_eq!(streaks.current_loss, 1);
        assert_eq!(streaks.current_win, 0);
        assert_eq!(streaks.max_win, 2);
        assert_eq!(streaks.max_loss, 1);
    }

    #[test]
    fn max_streaks_track_the_longest_runs() {
        let trades = ledger(&[
            dec!(10),
            dec!(10),
            dec!(-5),
            dec!(20),
            dec!(20),
            dec!(20),
        ]);
        let streaks = AnalyticsEngine::new().streaks(&trades);
        assert_eq!(streaks.max_win, 3);
        assert_eq!(streaks.max_loss, 1);
        // The winning run is still alive.
        assert_eq!(streaks.current_win, 3);
        assert_eq!(streaks.current_loss, 0);
    }

    #[test]
    fn at_most_one_current_streak_and_maxima_dominate() {
        for pnls in [
            vec![dec!(5), dec!(-1), dec!(7), dec!(9)],
            vec![dec!(-5), dec!(1), dec!(-7), dec!(-9)],
            vec![dec!(1), dec!(0), dec!(-1), dec!(2)],
        ] {
            let streaks = AnalyticsEngine::new().streaks(&ledger(&pnls));
            assert!(streaks.current_win == 0 || streaks.current_loss == 0);
            assert!(streaks.max_win >= streaks.current_win);
            assert!(streaks.max_loss >= streaks.current_loss);
        }
    }

    #[test]
    fn break_even_trades_reset_every_run() {
        // Flat trade splits the winning runs; the latest run survives it.
        let trades = ledger(&[dec!(20), dec!(20), dec!(20), dec!(0), dec!(30), dec!(40)]);
        let streaks = AnalyticsEngine::new().streaks(&trades);
        assert_eq!(streaks.max_win, 3);
        assert_eq!(streaks.current_win, 2);

        // Flat most-recent trade stops the backward scan immediately.
        let trades = ledger(&[dec!(10), dec!(0)]);
        let streaks = AnalyticsEngine::new().streaks(&trades);
        assert_eq!(streaks.current_win, 0);
        assert_eq!(streaks.current_loss, 0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut trades = ledger(&[dec!(100), dec!(50), dec!(-30), dec!(20), dec!(-10)]);
        trades.swap(0, 4);
        trades.swap(1, 3);
        let streaks = AnalyticsEngine::new().streaks(&trades);
        assert_eq!(streaks.current_loss, 1);
        assert_eq!(streaks.current_win, 0);
    }

    #[test]
    fn same_date_orders_by_creation_time() {
        let date = day(18);
        let mut earlier = trade(date, dec!(50));
        earlier.created_at = date.and_hms_opt(9, 0, 0).unwrap().and_utc();
        let mut later = trade(date, dec!(-20));
        later.created_at = date.and_hms_opt(15, 30, 0).unwrap().and_utc();

        let streaks = AnalyticsEngine::new().streaks(&[later, earlier]);
        assert_eq!(streaks.current_loss, 1);
        assert_eq!(streaks.current_win, 0);
    }

    #[test]
    fn empty_ledger_is_all_zeros_and_none() {
        let engine = AnalyticsEngine::new();
        let report = engine.calculate(&[], day(18), DEFAULT_RISK_FREE_RATE);

        assert_eq!(report.dashboard.total_trades, 0);
        assert_eq!(report.dashboard.total_pnl, Decimal::ZERO);
        assert_eq!(report.dashboard.win_rate_pct, None);
        assert_eq!(report.dashboard.streaks, StreakSummary::default());
        assert_eq!(report.average_risk_reward, None);
        assert_eq!(report.sharpe_ratio, None);
        assert_eq!(report.max_drawdown, None);
        assert!(report.symbol_heatmap.is_empty());
        assert_eq!(report.confidence_levels.len(), 10);
        assert!(report.setup_performance.is_empty());
    }

    #[test]
    fn dashboard_counts_exclude_break_even_from_win_loss() {
        let trades = ledger(&[dec!(100), dec!(-50), dec!(0), dec!(30)]);
        let stats = AnalyticsEngine::new().dashboard_stats(&trades, day(18));

        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.winning_trades, 2);
        assert_eq!(stats.losing_trades, 1);
        assert_eq!(stats.total_pnl, dec!(80));
        assert_eq!(stats.win_rate_pct, Some(dec!(50.00)));
        assert_eq!(stats.avg_profit, dec!(65.00));
        assert_eq!(stats.avg_loss, dec!(-50.00));
    }

    #[test]
    fn dashboard_today_and_week_windows() {
        // 2025-06-18 is a Wednesday; the week starts Monday the 16th.
        let as_of = day(18);
        let trades = vec![
            trade(day(18), dec!(40)),  // today, this week
            trade(day(16), dec!(-10)), // Monday, this week
            trade(day(15), dec!(25)),  // Sunday, previous week
            trade(day(19), dec!(99)),  // future-dated, outside the week window
            trade(day(2), dec!(5)),
        ];
        let stats = AnalyticsEngine::new().dashboard_stats(&trades, as_of);

        assert_eq!(stats.today_trades, 1);
        assert_eq!(stats.today_pnl, dec!(40));
        assert_eq!(stats.week_trades, 2);
        assert_eq!(stats.week_pnl, dec!(30));
        assert_eq!(stats.week_win_rate_pct, dec!(50.00));
    }

    #[test]
    fn sharpe_needs_two_closed_trades_and_variance() {
        let engine = AnalyticsEngine::new();

        assert_eq!(engine.sharpe_ratio(&[], DEFAULT_RISK_FREE_RATE), None);
        assert_eq!(
            engine.sharpe_ratio(&ledger(&[dec!(10)]), DEFAULT_RISK_FREE_RATE),
            None
        );

        // Identical returns have zero variance.
        let flat = ledger(&[dec!(10), dec!(10), dec!(10)]);
        assert_eq!(engine.sharpe_ratio(&flat, DEFAULT_RISK_FREE_RATE), None);

        // One closed plus one open is still a single-point series.
        let mut trades = ledger(&[dec!(10), dec!(30)]);
        trades[1].trade_status = TradeStatus::Open;
        assert_eq!(engine.sharpe_ratio(&trades, DEFAULT_RISK_FREE_RATE), None);
    }

    #[test]
    fn sharpe_annualizes_the_return_series() {
        // Returns 1% and 3%: mean 2, sample stdev sqrt(2), so at a zero
        // risk-free rate sharpe = (2 * 252) / (sqrt(2) * sqrt(252)) = sqrt(504).
        let trades = ledger(&[dec!(10), dec!(30)]);
        let engine = AnalyticsEngine::new();

        let sharpe = engine.sharpe_ratio(&trades, Decimal::ZERO).unwrap();
        assert_eq!(sharpe, dec!(22.4499));

        // A positive risk-free rate can only shrink the ratio.
        let with_rf = engine
            .sharpe_ratio(&trades, DEFAULT_RISK_FREE_RATE)
            .unwrap();
        assert!(with_rf < sharpe);
        assert!(with_rf > Decimal::ZERO);
    }

    #[test]
    fn drawdown_reports_percent_of_peak() {
        // Cumulative P&L: 100, 150, 80, 200, 50. Max decline 150 from the
        // 200 peak.
        let trades = ledger(&[dec!(100), dec!(50), dec!(-70), dec!(120), dec!(-150)]);
        let dd = AnalyticsEngine::new().max_drawdown(&trades).unwrap();
        assert_eq!(dd, MaxDrawdown::PercentOfPeak(dec!(75.00)));
        assert!(dd.value() >= Decimal::ZERO && dd.value() <= dec!(100));
    }

    #[test]
    fn drawdown_is_absolute_without_a_positive_peak() {
        let trades = ledger(&[dec!(-10), dec!(-20)]);
        let dd = AnalyticsEngine::new().max_drawdown(&trades).unwrap();
        assert_eq!(dd, MaxDrawdown::Absolute(dec!(30)));
    }

    #[test]
    fn drawdown_ignores_open_trades() {
        let mut trades = ledger(&[dec!(100), dec!(-40)]);
        trades.push({
            let mut t = trade(day(10), dec!(-1000));
            t.trade_status = TradeStatus::Open;
            t
        });
        let dd = AnalyticsEngine::new().max_drawdown(&trades).unwrap();
        assert_eq!(dd, MaxDrawdown::PercentOfPeak(dec!(40.00)));

        let only_open: Vec<Trade> = trades
            .into_iter()
            .map(|mut t| {
                t.trade_status = TradeStatus::Open;
                t
            })
            .collect();
        assert_eq!(AnalyticsEngine::new().max_drawdown(&only_open), None);
    }

    #[test]
    fn heatmap_windows_groups_and_sorts() {
        let as_of = day(18);
        let mut gbp_old = trade(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), dec!(500));
        gbp_old.symbol = "GBPUSD".to_string();
        let mut usd_open = trade(day(17), dec!(999));
        usd_open.symbol = "USDJPY".to_string();
        usd_open.trade_status = TradeStatus::Open;

        let mut aapl_a = trade(day(10), dec!(120));
        aapl_a.symbol = "AAPL".to_string();
        aapl_a.confidence_level = 8;
        let mut aapl_b = trade(day(12), dec!(-20));
        aapl_b.symbol = "AAPL".to_string();
        aapl_b.confidence_level = 6;
        let mut tsla = trade(day(11), dec!(-45.50));
        tsla.symbol = "TSLA".to_string();

        let trades = vec![gbp_old, usd_open, aapl_a, aapl_b, tsla];
        let heatmap = AnalyticsEngine::new().symbol_heatmap(&trades, as_of);

        assert_eq!(heatmap.len(), 2);
        assert_eq!(heatmap[0].symbol, "AAPL");
        assert_eq!(heatmap[0].trades, 2);
        assert_eq!(heatmap[0].wins, 1);
        assert_eq!(heatmap[0].win_rate_pct, dec!(50.00));
        assert_eq!(heatmap[0].total_pnl, dec!(100.00));
        assert_eq!(heatmap[0].avg_confidence, dec!(7.00));
        assert_eq!(heatmap[0].avg_pnl, dec!(50.00));
        assert_eq!(heatmap[1].symbol, "TSLA");

        // The rows partition the windowed closed-trade P&L.
        let windowed_total: Decimal = trades
            .iter()
            .filter(|t| t.trade_status.is_closed() && t.date >= as_of - Duration::days(30))
            .map(|t| t.profit_loss)
            .sum();
        let row_total: Decimal = heatmap.iter().map(|s| s.total_pnl).sum();
        assert_eq!(row_total, windowed_total);
    }

    #[test]
    fn confidence_buckets_cover_all_ten_levels() {
        let mut high_a = trade(day(1), dec!(80));
        high_a.confidence_level = 9;
        let mut high_b = trade(day(2), dec!(-40));
        high_b.confidence_level = 9;
        let mut ignored_open = trade(day(3), dec!(50));
        ignored_open.confidence_level = 9;
        ignored_open.trade_status = TradeStatus::Open;

        let buckets =
            AnalyticsEngine::new().confidence_performance(&[high_a, high_b, ignored_open]);

        assert_eq!(buckets.len(), 10);
        assert_eq!(
            buckets.iter().map(|b| b.level).collect::<Vec<_>>(),
            (1..=10u8).collect::<Vec<_>>()
        );

        let nine = &buckets[8];
        assert_eq!(nine.trades, 2);
        assert_eq!(nine.wins, 1);
        assert_eq!(nine.win_rate_pct, dec!(50.00));
        assert_eq!(nine.total_pnl, dec!(40.00));
        assert_eq!(nine.avg_pnl, dec!(20.00));
        assert_eq!(nine.avg_win, dec!(80.00));
        assert_eq!(nine.avg_loss, dec!(-40.00));

        // Untouched levels are zero-filled, not missing.
        let one = &buckets[0];
        assert_eq!(one.trades, 0);
        assert_eq!(one.avg_win, Decimal::ZERO);
    }

    #[test]
    fn average_risk_reward_skips_unset_levels() {
        let engine = AnalyticsEngine::new();

        // entry 100, stop 90, target 130 -> 3.00; entry 100, stop 95, target 105 -> 1.00
        let mut three_to_one = trade(day(1), dec!(10));
        three_to_one.stop_loss = dec!(90);
        three_to_one.target_price = dec!(130);
        let mut one_to_one = trade(day(2), dec!(10));
        one_to_one.stop_loss = dec!(95);
        one_to_one.target_price = dec!(105);
        let mut no_stop = trade(day(3), dec!(10));
        no_stop.stop_loss = Decimal::ZERO;

        assert_eq!(
            engine.average_risk_reward(&[three_to_one, one_to_one, no_stop.clone()]),
            Some(dec!(2.00))
        );
        assert_eq!(engine.average_risk_reward(&[no_stop]), None);
    }

    #[test]
    fn setup_performance_ranks_by_total_pnl() {
        let mut breakout = trade(day(1), dec!(30));
        breakout.setup_type = "BREAKOUT".to_string();
        let mut pullback_a = trade(day(2), dec!(100));
        pullback_a.setup_type = "PULLBACK".to_string();
        let mut pullback_b = trade(day(3), dec!(-20));
        pullback_b.setup_type = "PULLBACK".to_string();

        let rows = AnalyticsEngine::new().setup_performance(&[breakout, pullback_a, pullback_b]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].setup_type, "PULLBACK");
        assert_eq!(rows[0].trades, 2);
        assert_eq!(rows[0].total_pnl, dec!(80.00));
        assert_eq!(rows[0].win_rate_pct, dec!(50.00));
        assert_eq!(rows[1].setup_type, "BREAKOUT");
    }

    #[test]
    fn monthly_performance_groups_closed_trades() {
        let mut may = trade(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(), dec!(15));
        may.trade_status = TradeStatus::Closed;
        let june_a = trade(day(3), dec!(10));
        let june_b = trade(day(9), dec!(-4));
        let mut june_open = trade(day(10), dec!(77));
        june_open.trade_status = TradeStatus::Open;

        let rows =
            AnalyticsEngine::new().monthly_performance(&[june_a, may, june_b, june_open]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "2025-05");
        assert_eq!(rows[0].total_pnl, dec!(15));
        assert_eq!(rows[1].month, "2025-06");
        assert_eq!(rows[1].trades, 2);
        assert_eq!(rows[1].total_pnl, dec!(6));
    }

    #[test]
    fn daily_performance_keeps_recent_days_first() {
        let trades = vec![
            trade(day(1), dec!(10)),
            trade(day(1), dec!(20)),
            trade(day(5), dec!(-5)),
        ];
        let rows = AnalyticsEngine::new().daily_performance(&trades);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, day(5));
        assert_eq!(rows[1].date, day(1));
        assert_eq!(rows[1].trades, 2);
        assert_eq!(rows[1].total_pnl, dec!(30));
    }

    #[test]
    fn favorite_symbols_rank_by_activity() {
        let mut trades = ledger(&[dec!(1), dec!(2), dec!(3)]);
        trades[0].symbol = "AAPL".to_string();
        let rows = AnalyticsEngine::new().favorite_symbols(&trades);

        assert_eq!(rows[0].symbol, "EURUSD");
        assert_eq!(rows[0].trades, 2);
        assert_eq!(rows[1].symbol, "AAPL");
        assert_eq!(rows[1].trades, 1);
    }

    #[test]
    fn period_summary_bounds_are_inclusive() {
        let trades = vec![
            trade(day(1), dec!(100)),
            trade(day(7), dec!(-60)),
            trade(day(8), dec!(999)), // past the period end
        ];
        let summary = AnalyticsEngine::new().period_summary(&trades, day(1), day(7));

        assert_eq!(summary.total_trades, 2);
        assert_eq!(summary.winning_trades, 1);
        assert_eq!(summary.losing_trades, 1);
        assert_eq!(summary.total_pnl, dec!(40));
        assert_eq!(summary.win_rate_pct, dec!(50.00));
        assert_eq!(summary.max_drawdown, dec!(60.00));
    }

    #[test]
    fn full_report_wires_every_section() {
        let trades = ledger(&[dec!(100), dec!(50), dec!(-30), dec!(20), dec!(-10)]);
        let report = AnalyticsEngine::new().calculate(&trades, day(18), DEFAULT_RISK_FREE_RATE);

        assert_eq!(report.dashboard.total_trades, 5);
        assert_eq!(report.dashboard.streaks.current_loss, 1);
        assert!(report.sharpe_ratio.is_some());
        assert!(report.max_drawdown.is_some());
        assert_eq!(report.confidence_levels.len(), 10);
        assert_eq!(report.symbol_heatmap.len(), 1);
        assert_eq!(report.favorite_symbols[0].trades, 5);
        assert!(report.average_risk_reward.is_some());
    }
}
