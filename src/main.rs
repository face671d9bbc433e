use analytics::{AnalyticsEngine, DashboardStats, JournalReport, MaxDrawdown, PeriodSummary};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod store;

/// The main entry point for the tradelog journal application.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = configuration::load_config()?;

    let journal_path = cli
        .journal
        .unwrap_or_else(|| PathBuf::from(&config.journal.file));
    let trades = store::load_trades(&journal_path)?;
    let engine = AnalyticsEngine::new();

    match cli.command {
        Commands::Dashboard(args) => {
            let as_of = args.date.unwrap_or_else(today);
            print_dashboard(&engine.dashboard_stats(&trades, as_of));
        }
        Commands::Report(args) => {
            let as_of = args.date.unwrap_or_else(today);
            let rate = args
                .risk_free_rate
                .unwrap_or(config.analytics.risk_free_rate);
            print_report(&engine.calculate(&trades, as_of, rate));
        }
        Commands::Review(args) => {
            print_review(&engine.period_summary(&trades, args.start, args.end));
        }
        Commands::Export(args) => {
            store::write_csv(&args.output, &trades)?;
            println!(
                "Exported {} trades to {}",
                trades.len(),
                args.output.display()
            );
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A personal trading journal: log trades, measure the edge.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The journal snapshot to analyze, JSON or CSV (overrides config.toml).
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard: headline stats, streaks, today and this week.
    Dashboard(DashboardArgs),
    /// Show the full performance report.
    Report(ReportArgs),
    /// Summarize a review period (a week, a month, any date range).
    Review(ReviewArgs),
    /// Re-export the journal as CSV.
    Export(ExportArgs),
}

#[derive(Parser)]
struct DashboardArgs {
    /// Reference date for the today/this-week windows (format: YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Parser)]
struct ReportArgs {
    /// Reference date for the daily/weekly/heatmap windows (format: YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Annualized risk-free rate for the Sharpe ratio (e.g. 0.02).
    #[arg(long)]
    risk_free_rate: Option<Decimal>,
}

#[derive(Parser)]
struct ReviewArgs {
    /// First day of the review period (format: YYYY-MM-DD).
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the review period, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    end: NaiveDate,
}

#[derive(Parser)]
struct ExportArgs {
    /// The destination CSV file.
    #[arg(long)]
    output: PathBuf,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ==============================================================================
// Rendering
// ==============================================================================

fn print_dashboard(stats: &DashboardStats) {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total trades".to_string(), stats.total_trades.to_string()]);
    table.add_row(vec!["Winning trades".to_string(), stats.winning_trades.to_string()]);
    table.add_row(vec!["Losing trades".to_string(), stats.losing_trades.to_string()]);
    table.add_row(vec!["Win rate".to_string(), fmt_opt_pct(stats.win_rate_pct)]);
    table.add_row(vec!["Total P&L".to_string(), stats.total_pnl.to_string()]);
    table.add_row(vec!["Avg profit".to_string(), stats.avg_profit.to_string()]);
    table.add_row(vec!["Avg loss".to_string(), stats.avg_loss.to_string()]);
    table.add_row(vec![
        "Today".to_string(),
        format!("{} trades, P&L {}", stats.today_trades, stats.today_pnl),
    ]);
    table.add_row(vec![
        "This week".to_string(),
        format!(
            "{} trades, P&L {}, win rate {}%",
            stats.week_trades, stats.week_pnl, stats.week_win_rate_pct
        ),
    ]);
    table.add_row(vec![
        "Current streak".to_string(),
        if stats.streaks.current_loss > 0 {
            format!("{} losses", stats.streaks.current_loss)
        } else {
            format!("{} wins", stats.streaks.current_win)
        },
    ]);
    table.add_row(vec![
        "Longest streaks".to_string(),
        format!(
            "{} wins / {} losses",
            stats.streaks.max_win, stats.streaks.max_loss
        ),
    ]);
    println!("{table}");
}

fn print_report(report: &JournalReport) {
    print_dashboard(&report.dashboard);

    let mut table = Table::new();
    table.set_header(vec!["Risk metric", "Value"]);
    table.add_row(vec![
        "Avg risk-reward".to_string(),
        report
            .average_risk_reward
            .map_or_else(|| "n/a".to_string(), |r| r.to_string()),
    ]);
    table.add_row(vec![
        "Sharpe ratio".to_string(),
        report
            .sharpe_ratio
            .map_or_else(|| "n/a".to_string(), |s| s.to_string()),
    ]);
    table.add_row(vec![
        "Max drawdown".to_string(),
        match report.max_drawdown {
            Some(MaxDrawdown::PercentOfPeak(pct)) => format!("{pct}% of peak"),
            Some(MaxDrawdown::Absolute(value)) => value.to_string(),
            None => "n/a".to_string(),
        },
    ]);
    println!("{table}");

    if !report.symbol_heatmap.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            "Symbol", "Trades", "Wins", "Win rate %", "Total P&L", "Avg conf", "Avg P&L",
        ]);
        for row in &report.symbol_heatmap {
            table.add_row(vec![
                row.symbol.clone(),
                row.trades.to_string(),
                row.wins.to_string(),
                row.win_rate_pct.to_string(),
                row.total_pnl.to_string(),
                row.avg_confidence.to_string(),
                row.avg_pnl.to_string(),
            ]);
        }
        println!("Last 30 days by symbol:\n{table}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Confidence", "Trades", "Wins", "Win rate %", "Total P&L", "Avg P&L", "Avg win", "Avg loss",
    ]);
    for bucket in &report.confidence_levels {
        table.add_row(vec![
            bucket.level.to_string(),
            bucket.trades.to_string(),
            bucket.wins.to_string(),
            bucket.win_rate_pct.to_string(),
            bucket.total_pnl.to_string(),
            bucket.avg_pnl.to_string(),
            bucket.avg_win.to_string(),
            bucket.avg_loss.to_string(),
        ]);
    }
    println!("Confidence vs performance:\n{table}");

    if !report.setup_performance.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Setup", "Trades", "Win rate %", "Total P&L", "Avg P&L"]);
        for row in &report.setup_performance {
            table.add_row(vec![
                row.setup_type.clone(),
                row.trades.to_string(),
                row.win_rate_pct.to_string(),
                row.total_pnl.to_string(),
                row.avg_pnl.to_string(),
            ]);
        }
        println!("By setup:\n{table}");
    }

    if !report.monthly_performance.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Month", "Trades", "Total P&L"]);
        for row in &report.monthly_performance {
            table.add_row(vec![
                row.month.clone(),
                row.trades.to_string(),
                row.total_pnl.to_string(),
            ]);
        }
        println!("Monthly P&L:\n{table}");
    }

    if !report.daily_performance.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Date", "Trades", "Total P&L"]);
        for row in &report.daily_performance {
            table.add_row(vec![
                row.date.to_string(),
                row.trades.to_string(),
                row.total_pnl.to_string(),
            ]);
        }
        println!("Recent trading days:\n{table}");
    }

    if !report.favorite_symbols.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Symbol", "Trades"]);
        for row in &report.favorite_symbols {
            table.add_row(vec![row.symbol.clone(), row.trades.to_string()]);
        }
        println!("Most traded:\n{table}");
    }
}

fn print_review(summary: &PeriodSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        format!("{} to {}", summary.start, summary.end),
        "Value".to_string(),
    ]);
    table.add_row(vec!["Trades".to_string(), summary.total_trades.to_string()]);
    table.add_row(vec![
        "Winning / losing".to_string(),
        format!("{} / {}", summary.winning_trades, summary.losing_trades),
    ]);
    table.add_row(vec!["Win rate".to_string(), format!("{}%", summary.win_rate_pct)]);
    table.add_row(vec!["Total P&L".to_string(), summary.total_pnl.to_string()]);
    table.add_row(vec![
        "Max drawdown".to_string(),
        summary.max_drawdown.to_string(),
    ]);
    println!("{table}");
}

fn fmt_opt_pct(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v}%"))
}
