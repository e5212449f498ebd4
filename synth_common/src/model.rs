//! Synthetic company snapshot data model.
//!
//! Everything here is plain data with serde support; JSON field names are
//! camelCase and dates are ISO calendar dates (`YYYY-MM-DD`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::tickers::Ticker;

/// Closing price for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Price rounded to 2 decimals, never below 0.01.
    pub price: f64,
}

/// Quarterly dividend payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    /// Payment date.
    pub date: NaiveDate,
    /// Amount per share, 4 decimals.
    pub amount: f64,
}

/// Split ratios a synthetic company can go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum SplitRatio {
    /// Two-for-one.
    #[serde(rename = "2:1")]
    #[strum(serialize = "2:1")]
    TwoForOne,
    /// Three-for-one.
    #[serde(rename = "3:1")]
    #[strum(serialize = "3:1")]
    ThreeForOne,
    /// Three-for-two.
    #[serde(rename = "3:2")]
    #[strum(serialize = "3:2")]
    ThreeForTwo,
}

impl SplitRatio {
    /// Ratios in draw-index order.
    pub const ALL: [SplitRatio; 3] = [
        SplitRatio::TwoForOne,
        SplitRatio::ThreeForOne,
        SplitRatio::ThreeForTwo,
    ];
}

/// Historical stock split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockSplit {
    /// Effective date.
    pub date: NaiveDate,
    /// Split ratio.
    pub ratio: SplitRatio,
}

/// Synthetic market snapshot for one ticker.
///
/// Every field except `last_updated` is a pure function of the ticker and the
/// calendar day of generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticPriceData {
    /// Upper-cased symbol the snapshot was generated for.
    pub ticker: Ticker,
    /// Last point of `history_30d`.
    pub current_price: f64,
    /// 30 daily points, oldest first, ending today.
    #[serde(rename = "history30d")]
    pub history_30d: Vec<PricePoint>,
    /// Last close against the previous day, percent.
    #[serde(rename = "change1dPercent")]
    pub change_1d_percent: f64,
    /// Last close against the first point of the window, percent.
    #[serde(rename = "change30dPercent")]
    pub change_30d_percent: f64,
    /// One-year change, drawn from its own stream.
    #[serde(rename = "change1yPercent")]
    pub change_1y_percent: f64,
    /// Current price times shares outstanding, USD.
    pub market_cap: u64,
    /// Shares outstanding.
    pub shares_outstanding: u64,
    /// Daily trading volume in shares.
    pub volume: u64,
    /// Snapshot time; the only field driven by the wall clock.
    #[serde(with = "timestamp_millis")]
    pub last_updated: DateTime<Utc>,
    /// Annual earnings, USD.
    pub earnings: u64,
    /// Annual revenue, USD.
    pub revenue: u64,
    /// Headcount.
    pub employees: u64,
    /// Price to earnings.
    pub pe_ratio: f64,
    /// Earnings per share, 4 decimals.
    pub eps: f64,
    /// Annual dividend yield, percent.
    pub dividend_yield: f64,
    /// Last 8 quarters, oldest first.
    pub dividends: Vec<Dividend>,
    /// Zero to three splits sorted by date.
    pub stock_splits: Vec<StockSplit>,
    /// Shares failed to deliver.
    pub fails_to_deliver: u64,
    /// Market cap gained over the period, USD.
    pub market_cap_gain: u64,
    /// Market cap lost over the period, USD.
    pub market_cap_loss: u64,
    /// Operating margin, percent; may be negative.
    pub operating_margin: f64,
    /// Annualized borrow fee, percent.
    pub cost_to_borrow: f64,
    /// Total assets, USD.
    pub total_assets: u64,
    /// `total_assets - total_liabilities`.
    pub net_assets: i64,
    /// Total liabilities, USD.
    pub total_liabilities: u64,
    /// Debt portion of the liabilities, USD.
    pub total_debt: u64,
    /// Cash and equivalents, USD.
    pub cash_on_hand: u64,
    /// Price over book value per share, with book per share clamped to at least 1.
    pub price_to_book: f64,
}

impl SyntheticPriceData {
    /// Oldest price of the 30-day window.
    pub fn first_price(&self) -> f64 {
        self.history_30d.first().map_or(self.current_price, |p| p.price)
    }

    /// Price of the day before the last point.
    pub fn previous_price(&self) -> f64 {
        let idx = self.history_30d.len().saturating_sub(2);
        self.history_30d.get(idx).map_or(self.current_price, |p| p.price)
    }

    /// Market cap over revenue, with revenue clamped to at least 1.
    pub fn price_to_sales(&self) -> f64 {
        self.market_cap as f64 / self.revenue.max(1) as f64
    }

    /// Copy of the snapshot with the clock-driven field cleared, for equality
    /// checks across generation times.
    pub fn without_timestamp(&self) -> Self {
        Self {
            last_updated: DateTime::<Utc>::UNIX_EPOCH,
            ..self.clone()
        }
    }
}

/// RFC 3339 with exactly three fraction digits and a `Z` suffix.
mod timestamp_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn split_ratio_text_forms() {
        assert_eq!(SplitRatio::ThreeForTwo.to_string(), "3:2");
        assert_eq!(SplitRatio::from_str("2:1").unwrap(), SplitRatio::TwoForOne);
        assert_eq!(serde_json::to_string(&SplitRatio::ThreeForOne).unwrap(), "\"3:1\"");
    }

    #[test]
    fn price_point_serializes_iso_date() {
        let point = PricePoint {
            date: NaiveDate::from_ymd_opt(2026, 9, 20).unwrap(),
            price: 116.93,
        };
        assert_eq!(
            serde_json::to_string(&point).unwrap(),
            r#"{"date":"2026-09-20","price":116.93}"#
        );
    }
}
