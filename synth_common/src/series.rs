//! Series derived from a snapshot for company detail views.
//!
//! Each series reads its own Mulberry32 stream keyed `"<TICKER>:<name>"`, so
//! none of them disturbs the snapshot stream or each other. Yearly series walk
//! backwards from the snapshot value: every earlier year divides by
//! `1 + rate` with `rate` drawn inside the series' band.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::SyntheticPriceData;
use crate::prng::Draws;
use crate::rounding::{js_round, to_fixed};

/// Years covered by the fundamentals series (current year included).
pub const RECENT_YEARS: u32 = 15;
/// First year of the market-cap history.
pub const MARKET_CAP_START_YEAR: i32 = 1999;

/// One year of a yearly series, newest first in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyPoint {
    /// Calendar year.
    pub year: i32,
    /// Value for the year.
    pub value: f64,
    /// Change from this year's value to the following year's; `None` for the
    /// current year and for zero values.
    pub change_pct: Option<f64>,
}

/// Parameters of a backward yearly walk.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySeriesSpec {
    /// Key of the stream the yearly rates are drawn from.
    pub seed_key: String,
    /// Newest year of the series.
    pub current_year: i32,
    /// Number of years in the series, `current_year` included.
    pub years_back: u32,
    /// Value for `current_year`.
    pub current_value: f64,
    /// Lower bound of the yearly growth rate.
    pub min_rate: f64,
    /// Upper bound of the yearly growth rate.
    pub max_rate: f64,
    /// Smallest value a past year can take.
    pub floor: f64,
}

impl YearlySeriesSpec {
    /// Recent-years walk for `ticker`'s `name` stream with a zero floor.
    pub fn recent(ticker: &str, name: &str, current_year: i32, current_value: f64, min_rate: f64, max_rate: f64) -> Self {
        Self {
            seed_key: format!("{}:{}", ticker.to_uppercase(), name),
            current_year,
            years_back: RECENT_YEARS,
            current_value,
            min_rate,
            max_rate,
            floor: 0.0,
        }
    }

    /// Same walk with a different floor.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }
}

/// Backward yearly walk described by `spec`.
pub fn yearly_series(spec: &YearlySeriesSpec) -> Vec<YearlyPoint> {
    let mut rng = Draws::from_key(&spec.seed_key);
    let mut rows = Vec::with_capacity(spec.years_back.max(1) as usize);

    let mut value = spec.floor.max(spec.current_value);
    rows.push(YearlyPoint {
        year: spec.current_year,
        value,
        change_pct: None,
    });

    let oldest = spec.current_year - spec.years_back as i32 + 1;
    for year in (oldest..spec.current_year).rev() {
        let rate = spec
            .min_rate
            .max(spec.max_rate.min(spec.min_rate + (spec.max_rate - spec.min_rate) * rng.draw()));
        let denom = 0.01_f64.max(1.0 + rate);
        let prev = spec.floor.max(value / denom);
        let prev_rounded = if prev.abs() >= 1.0 { js_round(prev) } else { to_fixed(prev, 4) };
        let change_pct = if prev_rounded == 0.0 {
            None
        } else {
            Some(to_fixed((value - prev_rounded) / prev_rounded.abs() * 100.0, 2))
        };
        rows.push(YearlyPoint {
            year,
            value: prev_rounded,
            change_pct,
        });
        value = prev_rounded;
    }
    rows
}

/// Market capitalisation for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapPoint {
    /// Calendar year.
    pub year: i32,
    /// Market cap at year end, USD.
    pub market_cap: u64,
    /// Change into the following year, percent; `None` for the current year.
    pub change_pct: Option<f64>,
}

/// Market cap from `current_year` back to 1999, newest first.
pub fn market_cap_history(ticker: &str, market_cap: u64, current_year: i32) -> Vec<MarketCapPoint> {
    let mut rng = Draws::from_key(&format!("{}:mchist", ticker.to_uppercase()));
    let mut cap = market_cap as f64;
    let mut years = vec![MarketCapPoint {
        year: current_year,
        market_cap,
        change_pct: None,
    }];

    for year in (MARKET_CAP_START_YEAR..current_year).rev() {
        let rate = (-0.85_f64).max(2.0_f64.min((rng.draw() - 0.45) * 2.2));
        let denom = 0.12_f64.max(1.0 + rate);
        let prev_cap = 1.0_f64.max(js_round(cap / denom));
        let change_pct = to_fixed((cap - prev_cap) / prev_cap * 100.0, 2);
        years.push(MarketCapPoint {
            year,
            market_cap: prev_cap as u64,
            change_pct: Some(change_pct),
        });
        cap = prev_cap;
    }
    years
}

/// Borrow rate (percent) for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRate {
    /// Trading day.
    pub date: NaiveDate,
    /// Rate in percent, 2 decimals.
    pub value: f64,
}

/// Failed deliveries (shares) for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Trading day.
    pub date: NaiveDate,
    /// Share count.
    pub value: u64,
}

/// Daily short-side series aligned with `history_30d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market30d {
    /// Daily borrow fee.
    pub cost_to_borrow: Vec<DailyRate>,
    /// Daily failed deliveries.
    pub fails_to_deliver: Vec<DailyCount>,
}

/// Cost-to-borrow and fails-to-deliver wobbling around the snapshot values.
pub fn market_30d(data: &SyntheticPriceData) -> Market30d {
    let mut rng_borrow = Draws::from_key(&data.ticker.derived_key("borrow30d"));
    let mut rng_ftd = Draws::from_key(&data.ticker.derived_key("ftd30d"));
    let borrow_base = data.cost_to_borrow;
    let ftd_base = data.fails_to_deliver as f64;

    let cost_to_borrow = data
        .history_30d
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let wobble = (rng_borrow.draw() - 0.5) * 1.6;
            let value = 0.0_f64.max(borrow_base + wobble + (idx as f64 - 15.0) * 0.02);
            DailyRate {
                date: point.date,
                value: to_fixed(value, 2),
            }
        })
        .collect();

    let fails_to_deliver = data
        .history_30d
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let wobble = (rng_ftd.draw() - 0.4) * (ftd_base * 0.18 + 15.0);
            let value = 0.0_f64.max(ftd_base + wobble + (15.0 - idx as f64) * 0.8);
            DailyCount {
                date: point.date,
                value: js_round(value) as u64,
            }
        })
        .collect();

    Market30d {
        cost_to_borrow,
        fails_to_deliver,
    }
}

/// Balance-sheet figures for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRow {
    /// Calendar year.
    pub year: i32,
    /// Total assets, USD.
    pub assets: f64,
    /// Total liabilities, USD.
    pub liabilities: f64,
    /// Total debt, USD.
    pub debt: f64,
    /// Cash on hand, USD.
    pub cash: f64,
    /// Assets minus liabilities, USD.
    pub net_assets: f64,
}

/// Valuation multiples for one year, 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationRow {
    /// Calendar year.
    pub year: i32,
    /// Price to earnings.
    pub pe: f64,
    /// Price to sales.
    pub ps: f64,
    /// Price to book.
    pub pb: f64,
}

/// Every derived series of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHistory {
    /// Market cap since 1999, newest first.
    pub market_cap: Vec<MarketCapPoint>,
    /// Yearly revenue.
    pub revenue: Vec<YearlyPoint>,
    /// Yearly earnings.
    pub earnings: Vec<YearlyPoint>,
    /// Yearly earnings per share.
    pub eps: Vec<YearlyPoint>,
    /// Yearly operating margin, percent.
    pub operating_margin: Vec<YearlyPoint>,
    /// Yearly shares outstanding.
    pub shares: Vec<YearlyPoint>,
    /// Yearly balance sheet.
    pub balance: Vec<BalanceRow>,
    /// Yearly valuation multiples.
    pub valuation: Vec<ValuationRow>,
    /// Daily borrow and FTD series for the last 30 days.
    #[serde(rename = "market30d")]
    pub market_30d: Market30d,
}

impl CompanyHistory {
    /// Build all series for `data` with `current_year` as the newest year.
    pub fn build(data: &SyntheticPriceData, current_year: i32) -> Self {
        let ticker = data.ticker.as_str();
        let walk = |name: &str, value: f64, min_rate: f64, max_rate: f64| {
            yearly_series(&YearlySeriesSpec::recent(ticker, name, current_year, value, min_rate, max_rate))
        };

        let operating_margin = yearly_series(
            &YearlySeriesSpec::recent(ticker, "opmargin", current_year, data.operating_margin, -0.15, 0.15)
                .with_floor(-100.0),
        )
        .into_iter()
        .map(|row| YearlyPoint {
            value: to_fixed(row.value.clamp(-100.0, 100.0), 2),
            ..row
        })
        .collect();

        let assets = walk("assets", data.total_assets as f64, -0.08, 0.28);
        let liabilities = walk("liabilities", data.total_liabilities as f64, -0.1, 0.32);
        let debt = walk("debt", data.total_debt as f64, -0.2, 0.35);
        let cash = walk("cash", data.cash_on_hand as f64, -0.18, 0.5);
        let net_assets = walk("netassets", data.net_assets as f64, -0.12, 0.35);
        let balance = assets
            .iter()
            .enumerate()
            .map(|(idx, row)| BalanceRow {
                year: row.year,
                assets: row.value,
                liabilities: liabilities.get(idx).map_or(0.0, |r| r.value),
                debt: debt.get(idx).map_or(0.0, |r| r.value),
                cash: cash.get(idx).map_or(0.0, |r| r.value),
                net_assets: net_assets.get(idx).map_or(0.0, |r| r.value),
            })
            .collect();

        let pe = walk("pe", data.pe_ratio, -0.25, 0.25);
        let ps = walk("ps", data.price_to_sales(), -0.25, 0.25);
        let pb = walk("pb", data.price_to_book, -0.25, 0.25);
        let valuation = pe
            .iter()
            .enumerate()
            .map(|(idx, row)| ValuationRow {
                year: row.year,
                pe: to_fixed(row.value, 2),
                ps: to_fixed(ps.get(idx).map_or(0.0, |r| r.value), 2),
                pb: to_fixed(pb.get(idx).map_or(0.0, |r| r.value), 2),
            })
            .collect();

        Self {
            market_cap: market_cap_history(ticker, data.market_cap, current_year),
            revenue: walk("revenue", data.revenue as f64, -0.15, 0.55),
            earnings: walk("earnings", data.earnings as f64, -0.35, 0.75),
            eps: walk("eps", data.eps, -0.35, 0.85),
            operating_margin,
            shares: walk("shares", data.shares_outstanding as f64, -0.12, 0.18),
            balance,
            valuation,
            market_30d: market_30d(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(floor: f64) -> YearlySeriesSpec {
        YearlySeriesSpec::recent("abc", "revenue", 2026, 1_000.0, -0.15, 0.55).with_floor(floor)
    }

    #[test]
    fn yearly_series_covers_recent_years_newest_first() {
        let rows = yearly_series(&spec(0.0));
        assert_eq!(rows.len(), RECENT_YEARS as usize);
        assert_eq!(rows[0].year, 2026);
        assert_eq!(rows[0].change_pct, None);
        assert_eq!(rows.last().unwrap().year, 2012);
        assert!(rows.windows(2).all(|w| w[0].year == w[1].year + 1));
    }

    #[test]
    fn yearly_series_seed_key_is_upper_cased() {
        assert_eq!(spec(0.0).seed_key, "ABC:revenue");
    }

    #[test]
    fn zero_value_has_no_change() {
        let rows = yearly_series(&YearlySeriesSpec::recent("abc", "cash", 2026, 0.0, -0.1, 0.1));
        assert!(rows.iter().all(|r| r.value == 0.0 && r.change_pct.is_none()));
    }

    #[test]
    fn floor_applies_to_current_value() {
        let rows = yearly_series(&YearlySeriesSpec::recent("abc", "x", 2026, -5.0, -0.1, 0.1));
        assert_eq!(rows[0].value, 0.0);
    }

    #[test]
    fn market_cap_history_never_drops_below_one() {
        let rows = market_cap_history("TINY", 3, 2026);
        assert_eq!(rows.len(), (2026 - MARKET_CAP_START_YEAR + 1) as usize);
        assert!(rows.iter().all(|r| r.market_cap >= 1));
    }
}
