//! Deterministic synthetic market snapshot generator.
//!
//! `generate_at(ticker, now)` derives a full [`SyntheticPriceData`] from the
//! upper-cased ticker: a 30-day random walk, a handful of correlated
//! fundamentals, a dividend history and stock splits. All values come from a
//! single Mulberry32 stream seeded with the FNV-1a hash of the ticker, consumed
//! in a fixed order; moving any draw shifts every value after it.
//!
//! The 1-year change is the exception: it reads its own stream seeded from
//! `"<TICKER>:1y"` and leaves the main stream untouched.
//!
//! `now` decides the calendar dates and the `last_updated` timestamp
//! (`now` minus a drawn offset of up to one hour).

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, Utc};
use log::debug;

use crate::clock::{Clock, SystemClock};
use crate::model::{Dividend, PricePoint, SplitRatio, StockSplit, SyntheticPriceData};
use crate::prng::Draws;
use crate::rounding::{js_round, to_fixed};
use crate::seed::Seed;
use crate::tickers::Ticker;

/// Number of daily points in the price history.
pub const HISTORY_DAYS: u64 = 30;
/// Number of quarterly dividends reported.
pub const DIVIDEND_QUARTERS: u32 = 8;
/// Lowest price the random walk can reach.
pub const MIN_PRICE: f64 = 0.01;
/// Upper bound (exclusive) on the number of stock splits.
const MAX_SPLITS: f64 = 4.0;
/// Maximum age of a snapshot timestamp, in milliseconds.
const MAX_STALENESS_MS: f64 = 1000.0 * 60.0 * 60.0;

/// Snapshot generator bound to a clock.
#[derive(Debug, Clone, Default)]
pub struct SyntheticSeriesGenerator<C: Clock = SystemClock> {
    clock: C,
}

impl SyntheticSeriesGenerator<SystemClock> {
    /// Generator reading the wall clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> SyntheticSeriesGenerator<C> {
    /// Generator reading `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Snapshot for `ticker` at the clock's current time.
    pub fn generate(&self, ticker: &str) -> SyntheticPriceData {
        generate_at(ticker, self.clock.now())
    }
}

/// Snapshot for `ticker` at the current wall-clock time.
pub fn generate(ticker: &str) -> SyntheticPriceData {
    generate_at(ticker, SystemClock.now())
}

/// Snapshot for `ticker` as of `now`.
pub fn generate_at(ticker: &str, now: DateTime<Utc>) -> SyntheticPriceData {
    let (data, draws) = build(ticker, now);
    debug!("Generated snapshot for {:?} using {} draws", data.ticker.as_str(), draws);
    data
}

fn build(ticker: &str, now: DateTime<Utc>) -> (SyntheticPriceData, usize) {
    let ticker = Ticker::new(ticker);
    let mut rng = Draws::new(Seed::from_key(ticker.as_str()));
    let today = now.date_naive();

    let base = js_round(5.0 + rng.draw() * 495.0);

    let mut history = Vec::with_capacity(HISTORY_DAYS as usize);
    let mut price = base;
    for days_back in (0..HISTORY_DAYS).rev() {
        let drift = (rng.draw() - 0.5) * 0.04;
        price = MIN_PRICE.max(to_fixed(price * (1.0 + drift), 2));
        history.push(PricePoint {
            date: days_before(today, days_back),
            price,
        });
    }

    let first = history[0].price;
    let last = history[history.len() - 1].price;
    let prev = history[history.len().saturating_sub(2)].price;
    let change_1d_percent = to_fixed((last - prev) / prev * 100.0, 2);
    let change_30d_percent = to_fixed((last - first) / first * 100.0, 2);

    let mut rng_1y = Draws::from_key(&ticker.derived_key("1y"));
    let change_1y_percent = to_fixed((rng_1y.draw() - 0.35) * 180.0, 2);

    let shares = js_round(1e7 + rng.draw() * 2e11);
    let market_cap = js_round(last * shares);
    let volume = js_round(1e5 + rng.draw() * 5e7);

    let earnings = js_round((last * shares) / (20.0 + rng.draw() * 40.0));
    let revenue = js_round(earnings * (5.0 + rng.draw() * 10.0));
    let employees = js_round(50.0 + rng.draw() * 200_000.0);
    let pe_ratio = to_fixed(rng.draw() * 30.0 + 5.0, 2);
    let eps = to_fixed(earnings / shares.max(1.0), 4);
    let dividend_yield = to_fixed(rng.draw() * 5.0, 2);

    let dividends = dividend_history(&mut rng, today, dividend_yield, last);
    let stock_splits = split_history(&mut rng);

    let fails_to_deliver = js_round(rng.draw() * 1_500_000.0);
    let market_cap_gain = js_round(rng.draw() * market_cap * 0.2);
    let market_cap_loss = js_round(rng.draw() * market_cap * 0.15);
    let operating_margin = to_fixed(rng.draw() * 40.0 - 5.0, 2);
    let cost_to_borrow = to_fixed(rng.draw() * 3.0, 2);
    let total_assets = js_round(market_cap * (0.5 + rng.draw() * 3.0));
    let total_liabilities = js_round(total_assets * (0.2 + rng.draw() * 0.8));
    let total_debt = js_round(total_liabilities * (0.1 + rng.draw() * 0.6));
    let cash_on_hand = js_round(total_assets * (0.01 + rng.draw() * 0.3));
    let net_assets = total_assets - total_liabilities;
    let price_to_book = to_fixed(last / (net_assets / shares).max(1.0), 2);

    let staleness_ms = js_round(rng.draw() * MAX_STALENESS_MS) as i64;
    let last_updated = DateTime::from_timestamp_millis(now.timestamp_millis() - staleness_ms)
        .or_else(|| now.checked_sub_signed(Duration::milliseconds(staleness_ms)))
        .unwrap_or(now);

    let data = SyntheticPriceData {
        ticker,
        current_price: last,
        history_30d: history,
        change_1d_percent,
        change_30d_percent,
        change_1y_percent,
        market_cap: market_cap as u64,
        shares_outstanding: shares as u64,
        volume: volume as u64,
        last_updated,
        earnings: earnings as u64,
        revenue: revenue as u64,
        employees: employees as u64,
        pe_ratio,
        eps,
        dividend_yield,
        dividends,
        stock_splits,
        fails_to_deliver: fails_to_deliver as u64,
        market_cap_gain: market_cap_gain as u64,
        market_cap_loss: market_cap_loss as u64,
        operating_margin,
        cost_to_borrow,
        total_assets: total_assets as u64,
        net_assets: net_assets as i64,
        total_liabilities: total_liabilities as u64,
        total_debt: total_debt as u64,
        cash_on_hand: cash_on_hand as u64,
        price_to_book,
    };
    (data, rng.count())
}

/// Eight quarterly payments ending today, each jittered within ±15%.
fn dividend_history(rng: &mut Draws, today: NaiveDate, dividend_yield: f64, last: f64) -> Vec<Dividend> {
    let annual = (dividend_yield / 100.0) * last;
    let quarterly = to_fixed(annual / 4.0, 4);
    (0..DIVIDEND_QUARTERS)
        .rev()
        .map(|quarters_back| {
            let jitter = 0.85 + rng.draw() * 0.3;
            Dividend {
                date: months_before(today, quarters_back * 3),
                amount: to_fixed((quarterly * jitter).max(0.0), 4),
            }
        })
        .collect()
}

/// Zero to three splits between 2000 and 2025, sorted by date.
fn split_history(rng: &mut Draws) -> Vec<StockSplit> {
    let count = (rng.draw() * MAX_SPLITS).floor() as usize;
    let mut splits = Vec::with_capacity(count);
    for _ in 0..count {
        let year = 2000 + (rng.draw() * 26.0).floor() as i32;
        let month = 1 + (rng.draw() * 12.0).floor() as u32;
        let day = 1 + (rng.draw() * 28.0).floor() as u32;
        let ratio = SplitRatio::ALL[(rng.draw() * SplitRatio::ALL.len() as f64).floor() as usize];
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            splits.push(StockSplit { date, ratio });
        }
    }
    splits.sort_by_key(|split| split.date);
    splits
}

fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

/// Same day-of-month `months` earlier; a day past the end of the target
/// month rolls over into the next one (May 31 - 3 months = Mar 3).
fn months_before(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .with_day(1)
        .and_then(|first| first.checked_sub_months(Months::new(months)))
        .and_then(|first| first.checked_add_days(Days::new(u64::from(today.day0()))))
        .unwrap_or(today)
}
