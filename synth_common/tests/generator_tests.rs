use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use synth_common::model::SplitRatio;
use synth_common::rounding::to_fixed;
use synth_common::{generate, generate_at, SyntheticPriceData, SyntheticSeriesGenerator};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn random_tickers(seed: u64, count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.random_range(0..8);
            (&mut rng).sample_iter(Alphanumeric).take(len).map(char::from).collect()
        })
        .collect()
}

const TEST_PRICES: [f64; 30] = [
    116.93, 118.16, 117.07, 116.17, 114.62, 115.93, 118.2, 117.39, 116.05, 114.46, 116.57, 115.17,
    116.31, 116.18, 115.58, 116.36, 114.36, 114.38, 113.49, 112.12, 110.93, 109.25, 110.81, 110.51,
    109.67, 110.64, 110.93, 112.74, 111.75, 111.84,
];

#[test]
fn golden_snapshot_for_test_ticker() {
    let data = generate_at("TEST", fixed_now());

    let prices: Vec<f64> = data.history_30d.iter().map(|p| p.price).collect();
    assert_eq!(prices, TEST_PRICES);
    assert_eq!(data.history_30d[0].date, date(2026, 9, 20));
    assert_eq!(data.history_30d[29].date, date(2026, 10, 19));

    assert_eq!(data.ticker.as_str(), "TEST");
    assert_eq!(data.current_price, 111.84);
    assert_eq!(data.change_1d_percent, 0.08);
    assert_eq!(data.change_30d_percent, -4.35);
    assert_eq!(data.change_1y_percent, 80.62);
    assert_eq!(data.market_cap, 14_226_816_054_266);
    assert_eq!(data.shares_outstanding, 127_206_867_438);
    assert_eq!(data.volume, 22_114_488);
    assert_eq!(data.earnings, 254_700_487_056);
    assert_eq!(data.revenue, 2_643_122_482_084);
    assert_eq!(data.employees, 23_373);
    assert_eq!(data.pe_ratio, 23.56);
    assert_eq!(data.eps, 2.0023);
    assert_eq!(data.dividend_yield, 2.79);
    assert_eq!(data.fails_to_deliver, 799_026);
    assert_eq!(data.market_cap_gain, 1_256_556_375_207);
    assert_eq!(data.market_cap_loss, 495_476_774_786);
    assert_eq!(data.operating_margin, 3.64);
    assert_eq!(data.cost_to_borrow, 1.65);
    assert_eq!(data.total_assets, 9_605_367_827_303);
    assert_eq!(data.net_assets, 5_955_965_245_185);
    assert_eq!(data.total_liabilities, 3_649_402_582_118);
    assert_eq!(data.total_debt, 1_525_715_323_877);
    assert_eq!(data.cash_on_hand, 882_853_521_534);
    assert_eq!(data.price_to_book, 2.39);

    let amounts: Vec<f64> = data.dividends.iter().map(|d| d.amount).collect();
    assert_eq!(amounts, vec![0.784, 0.8587, 0.6918, 0.8657, 0.6797, 0.8148, 0.7324, 0.7981]);

    let splits: Vec<(NaiveDate, SplitRatio)> = data.stock_splits.iter().map(|s| (s.date, s.ratio)).collect();
    assert_eq!(
        splits,
        vec![
            (date(2015, 10, 2), SplitRatio::ThreeForOne),
            (date(2015, 11, 3), SplitRatio::ThreeForOne),
            (date(2020, 5, 20), SplitRatio::ThreeForTwo),
        ]
    );

    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["lastUpdated"], "2026-10-19T11:17:34.770Z");
    assert_eq!(json["history30d"][0]["date"], "2026-09-20");
    assert_eq!(json["stockSplits"][2]["ratio"], "3:2");
}

#[test]
fn empty_ticker_is_valid_and_deterministic() {
    let data = generate_at("", fixed_now());
    assert_eq!(data.current_price, 308.15);
    assert_eq!(data.change_30d_percent, 0.07);
    assert_eq!(data.market_cap, 7_961_266_227_055);
    assert_eq!(data.price_to_book, 1.21);
    assert_eq!(data, generate_at("", fixed_now()));
}

#[test]
fn deterministic_across_calls() {
    for ticker in random_tickers(1, 50) {
        assert_eq!(generate_at(&ticker, fixed_now()), generate_at(&ticker, fixed_now()));
    }
}

#[test]
fn wall_clock_only_moves_timestamp() {
    let a = generate("AAPL");
    let b = generate("AAPL");
    if a.history_30d[29].date == b.history_30d[29].date {
        assert_eq!(a.without_timestamp(), b.without_timestamp());
    }
}

#[test]
fn case_insensitive() {
    assert_eq!(generate_at("aapl", fixed_now()), generate_at("AAPL", fixed_now()));
    assert_eq!(generate_at("BrK.b", fixed_now()), generate_at("BRK.B", fixed_now()));
}

#[test]
fn history_shape_and_positivity() {
    for ticker in random_tickers(2, 100) {
        let data = generate_at(&ticker, fixed_now());
        assert_eq!(data.history_30d.len(), 30);
        assert_eq!(data.history_30d[29].date, fixed_now().date_naive());
        for pair in data.history_30d.windows(2) {
            assert_eq!(pair[0].date.checked_add_days(Days::new(1)), Some(pair[1].date));
        }
        assert!(data.history_30d.iter().all(|p| p.price >= 0.01));
        assert_eq!(data.current_price, data.history_30d[29].price);
    }
}

#[test]
fn last_date_is_today_with_wall_clock() {
    let before = Utc::now().date_naive();
    let data = generate("MSFT");
    let after = Utc::now().date_naive();
    let last = data.history_30d[29].date;
    assert!(last == before || last == after);
}

fn check_identities(data: &SyntheticPriceData) {
    let first = data.history_30d[0].price;
    let last = data.history_30d[29].price;
    assert_eq!(data.first_price(), first);
    assert_eq!(data.change_30d_percent, to_fixed((last - first) / first * 100.0, 2));
    let prev = data.previous_price();
    assert_eq!(prev, data.history_30d[28].price);
    assert_eq!(data.change_1d_percent, to_fixed((last - prev) / prev * 100.0, 2));
    assert_eq!(data.net_assets, data.total_assets as i64 - data.total_liabilities as i64);

    let book_per_share = data.net_assets as f64 / data.shares_outstanding as f64;
    assert_eq!(data.price_to_book, to_fixed(last / book_per_share.max(1.0), 2));
    if book_per_share <= 1.0 {
        assert_eq!(data.price_to_book, to_fixed(last, 2));
    }
}

#[test]
fn derived_identities_hold() {
    for ticker in random_tickers(3, 200) {
        check_identities(&generate_at(&ticker, fixed_now()));
    }
    check_identities(&generate_at("TEST", fixed_now()));
}

#[test]
fn price_to_book_uses_price_when_book_per_share_below_one() {
    let data = generate_at("TL3", fixed_now());
    assert_eq!(data.current_price, 10.58);
    assert_eq!(data.net_assets, 7_221_827_180);
    assert_eq!(data.shares_outstanding, 16_834_086_988);
    let book_per_share = data.net_assets as f64 / data.shares_outstanding as f64;
    assert!(book_per_share < 1.0);
    assert_eq!(data.price_to_book, to_fixed(data.current_price, 2));
    assert_eq!(data.price_to_book, 10.58);
    check_identities(&data);
}

#[test]
fn dividend_dates_roll_over_from_month_end() {
    let now = Utc.with_ymd_and_hms(2026, 5, 31, 12, 0, 0).unwrap();
    let dates: Vec<NaiveDate> = generate_at("TEST", now).dividends.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        [
            date(2024, 8, 31),
            date(2024, 12, 1),
            date(2025, 3, 3),
            date(2025, 5, 31),
            date(2025, 8, 31),
            date(2025, 12, 1),
            date(2026, 3, 3),
            date(2026, 5, 31),
        ]
    );
    let amounts: Vec<f64> = generate_at("TEST", now).dividends.iter().map(|d| d.amount).collect();
    let pinned: Vec<f64> = generate_at("TEST", fixed_now()).dividends.iter().map(|d| d.amount).collect();
    assert_eq!(amounts, pinned);
}

#[test]
fn earliest_clock_clamps_timestamp_to_now() {
    let now = NaiveDate::MIN.and_time(NaiveTime::MIN).and_utc();
    let data = generate_at("TEST", now);
    assert_eq!(data.last_updated, now);
    assert_eq!(data.history_30d.len(), 30);
    assert_eq!(data.dividends.len(), 8);
}

#[test]
fn fields_stay_in_documented_ranges() {
    for ticker in random_tickers(4, 200) {
        let data = generate_at(&ticker, fixed_now());
        assert!((5.0..=35.0).contains(&data.pe_ratio));
        assert!((-5.0..=35.0).contains(&data.operating_margin));
        assert!((0.0..=3.0).contains(&data.cost_to_borrow));
        assert!((0.0..=5.0).contains(&data.dividend_yield));
        assert!((10_000_000..=200_010_000_000).contains(&data.shares_outstanding));
        assert!((100_000..=50_100_000).contains(&data.volume));
        assert!(data.stock_splits.len() <= 3);
        assert!(data.stock_splits.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(data.dividends.len(), 8);
        let age = fixed_now() - data.last_updated;
        assert!(age.num_milliseconds() >= 0 && age.num_milliseconds() <= 3_600_000);
    }
}

#[test]
fn distinct_tickers_get_distinct_streams() {
    let aapl = generate_at("AAPL", fixed_now());
    let msft = generate_at("MSFT", fixed_now());
    assert_ne!(aapl.history_30d, msft.history_30d);
    assert_ne!(aapl.market_cap, msft.market_cap);
    assert_ne!(aapl.shares_outstanding, msft.shares_outstanding);
}

#[test]
fn wall_clock_generator_produces_full_snapshot() {
    let data = SyntheticSeriesGenerator::new().generate("amzn");
    assert_eq!(data.ticker.as_str(), "AMZN");
    assert_eq!(data.history_30d.len(), 30);
    assert!(Utc::now() >= data.last_updated);
}
