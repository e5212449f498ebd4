//! Rendering generated snapshots to a writer.
//!
//! Table and CSV print one summary row per ticker, or with `history` the daily
//! prices instead. JSON prints the full snapshots and, with `derived`, the
//! series built from them.

use std::io::Write;

use serde::Serialize;
use synth_common::format::{format_compact, format_money_compact, format_percent, format_usd};
use synth_common::ranking::rank_by_market_cap;
use synth_common::series::CompanyHistory;
use synth_common::{Result, SyntheticPriceData};

use crate::args::OutputFormat;

/// Output switches taken from the command line.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    pub format: OutputFormat,
    pub history: bool,
    pub derived: bool,
    pub rank: bool,
    pub current_year: i32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<usize>,
    #[serde(flatten)]
    snapshot: &'a SyntheticPriceData,
    #[serde(skip_serializing_if = "Option::is_none")]
    derived: Option<CompanyHistory>,
}

/// Writes snapshots in the configured format.
pub struct Printer {
    options: PrintOptions,
}

impl Printer {
    pub fn new(options: PrintOptions) -> Self {
        Self { options }
    }

    /// Render `snapshots` (input order, or rank order with `rank`).
    pub fn write<W: Write>(&self, out: &mut W, snapshots: &[SyntheticPriceData]) -> Result<()> {
        let rows: Vec<(Option<usize>, &SyntheticPriceData)> = if self.options.rank {
            rank_by_market_cap(snapshots)
                .into_iter()
                .map(|(rank, data)| (Some(rank), data))
                .collect()
        } else {
            snapshots.iter().map(|data| (None, data)).collect()
        };

        match self.options.format {
            OutputFormat::Json => self.write_json(out, &rows),
            OutputFormat::Csv if self.options.history => write_history_csv(out, &rows),
            OutputFormat::Csv => write_summary_csv(out, &rows),
            OutputFormat::Table if self.options.history => write_history_table(out, &rows),
            OutputFormat::Table => write_summary_table(out, &rows),
        }
    }

    fn write_json<W: Write>(&self, out: &mut W, rows: &[(Option<usize>, &SyntheticPriceData)]) -> Result<()> {
        let reports: Vec<JsonReport> = rows
            .iter()
            .map(|&(rank, snapshot)| JsonReport {
                rank,
                snapshot,
                derived: self
                    .options
                    .derived
                    .then(|| CompanyHistory::build(snapshot, self.options.current_year)),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
        Ok(())
    }
}

fn write_summary_table<W: Write>(out: &mut W, rows: &[(Option<usize>, &SyntheticPriceData)]) -> Result<()> {
    writeln!(
        out,
        "{:>4}  {:<8} {:>12} {:>8} {:>8} {:>9} {:>10} {:>8} {:>7} {:>6}  {}",
        "#", "TICKER", "PRICE", "1D", "30D", "1Y", "MKT CAP", "VOLUME", "P/E", "YIELD", "UPDATED"
    )?;
    for (idx, (rank, data)) in rows.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<8} {:>12} {:>8} {:>8} {:>9} {:>10} {:>8} {:>7.2} {:>5.2}%  {}",
            rank.unwrap_or(idx + 1),
            data.ticker.as_str(),
            format_usd(data.current_price),
            format_percent(data.change_1d_percent),
            format_percent(data.change_30d_percent),
            format_percent(data.change_1y_percent),
            format_money_compact(data.market_cap as f64),
            format_compact(data.volume as f64),
            data.pe_ratio,
            data.dividend_yield,
            data.last_updated.format("%Y-%m-%d %H:%M:%S"),
        )?;
    }
    Ok(())
}

fn write_history_table<W: Write>(out: &mut W, rows: &[(Option<usize>, &SyntheticPriceData)]) -> Result<()> {
    for (rank, data) in rows {
        match rank {
            Some(rank) => writeln!(out, "#{} {}", rank, data.ticker)?,
            None => writeln!(out, "{}", data.ticker)?,
        }
        for point in &data.history_30d {
            writeln!(out, "  {}  {:>12}", point.date, format_usd(point.price))?;
        }
    }
    Ok(())
}

fn write_summary_csv<W: Write>(out: &mut W, rows: &[(Option<usize>, &SyntheticPriceData)]) -> Result<()> {
    writeln!(
        out,
        "rank,ticker,price,change1d,change30d,change1y,marketCap,volume,peRatio,dividendYield,priceToBook,lastUpdated"
    )?;
    for (idx, (rank, data)) in rows.iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            rank.unwrap_or(idx + 1),
            data.ticker,
            data.current_price,
            data.change_1d_percent,
            data.change_30d_percent,
            data.change_1y_percent,
            data.market_cap,
            data.volume,
            data.pe_ratio,
            data.dividend_yield,
            data.price_to_book,
            data.last_updated.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        )?;
    }
    Ok(())
}

fn write_history_csv<W: Write>(out: &mut W, rows: &[(Option<usize>, &SyntheticPriceData)]) -> Result<()> {
    writeln!(out, "ticker,date,price")?;
    for (_, data) in rows {
        for point in &data.history_30d {
            writeln!(out, "{},{},{}", data.ticker, point.date, point.price)?;
        }
    }
    Ok(())
}
