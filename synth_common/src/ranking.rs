//! Market-cap ranking across snapshots.

use std::collections::HashMap;

use crate::model::SyntheticPriceData;
use crate::tickers::Ticker;

/// Snapshots paired with their 1-based rank, largest market cap first.
/// Equal market caps keep their input order.
pub fn rank_by_market_cap(snapshots: &[SyntheticPriceData]) -> Vec<(usize, &SyntheticPriceData)> {
    let mut ordered: Vec<&SyntheticPriceData> = snapshots.iter().collect();
    ordered.sort_by(|a, b| b.market_cap.cmp(&a.market_cap));
    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, data)| (idx + 1, data))
        .collect()
}

/// Rank of every ticker; a repeated ticker keeps its best (smallest) rank.
pub fn ranks_by_ticker(snapshots: &[SyntheticPriceData]) -> HashMap<Ticker, usize> {
    let mut ranks = HashMap::with_capacity(snapshots.len());
    for (rank, data) in rank_by_market_cap(snapshots) {
        ranks.entry(data.ticker.clone()).or_insert(rank);
    }
    ranks
}
