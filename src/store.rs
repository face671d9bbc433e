use anyhow::{bail, Context, Result};
use core_types::Trade;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Reads a journal snapshot from a JSON or CSV file, chosen by extension.
pub fn load_trades(path: &Path) -> Result<Vec<Trade>> {
    let trades = match extension(path) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => read_json(path)?,
        Some(ext) if ext.eq_ignore_ascii_case("csv") => read_csv(path)?,
        _ => bail!("unsupported journal format: {}", path.display()),
    };
    info!(trades = trades.len(), file = %path.display(), "journal loaded");
    Ok(trades)
}

/// Writes the snapshot out as CSV, one row per trade.
pub fn write_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for trade in trades {
        writer.serialize(trade)?;
    }
    writer.flush()?;
    info!(trades = trades.len(), file = %path.display(), "journal exported");
    Ok(())
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn read_json(path: &Path) -> Result<Vec<Trade>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open journal {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("malformed JSON journal {}", path.display()))
}

fn read_csv(path: &Path) -> Result<Vec<Trade>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open journal {}", path.display()))?;
    let mut trades = Vec::new();
    for record in reader.deserialize() {
        let trade: Trade =
            record.with_context(|| format!("malformed CSV journal {}", path.display()))?;
        trades.push(trade);
    }
    Ok(trades)
}
