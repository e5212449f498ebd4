//! Batch snapshot generation on a worker pool.
//!
//! Jobs `(index, ticker)` are queued on a `crossbeam_channel`, a fixed number
//! of scoped worker threads drain the queue, and results are reassembled in
//! input order. Every worker generates independently; no generator state is
//! shared, so the output equals calling `generate_at` sequentially.

use std::thread;

use chrono::{DateTime, Utc};
use crossbeam_channel::unbounded;
use log::{debug, error};

use crate::error::SynthError;
use crate::generator::generate_at;
use crate::model::SyntheticPriceData;
use crate::result::Result;
use crate::tickers::Ticker;

/// Default number of worker threads.
pub const DEFAULT_WORKERS: usize = 4;

/// Fixed-size pool generating many snapshots at once.
#[derive(Debug, Clone, Copy)]
pub struct BatchGenerator {
    workers: usize,
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl BatchGenerator {
    /// Pool with `workers` threads (at least one).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Configured worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Snapshots for `tickers` as of `now`, in input order.
    pub fn generate_all(&self, tickers: &[Ticker], now: DateTime<Utc>) -> Result<Vec<SyntheticPriceData>> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }

        let (job_tx, job_rx) = unbounded::<(usize, Ticker)>();
        for job in tickers.iter().cloned().enumerate() {
            job_tx
                .send(job)
                .map_err(|e| SynthError::ChannelSend(e.to_string()))?;
        }
        drop(job_tx);

        let workers = self.workers.min(tickers.len());
        let mut slots: Vec<Option<SyntheticPriceData>> = (0..tickers.len()).map(|_| None).collect();

        thread::scope(|scope| {
            let (result_tx, result_rx) = unbounded::<(usize, SyntheticPriceData)>();
            for worker in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    let mut done = 0usize;
                    for (idx, ticker) in job_rx.iter() {
                        if let Err(e) = result_tx.send((idx, generate_at(ticker.as_str(), now))) {
                            error!("Batch worker {} could not deliver {}: {}", worker, ticker, e);
                            break;
                        }
                        done += 1;
                    }
                    debug!("Batch worker {} finished after {} jobs", worker, done);
                });
            }
            drop(result_tx);

            for (idx, data) in result_rx.iter() {
                slots[idx] = Some(data);
            }
        });

        slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| {
                slot.ok_or_else(|| SynthError::ChannelRecv(format!("no result for job {} ({})", idx, tickers[idx])))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn output_matches_sequential_generation_in_order() {
        let tickers: Vec<Ticker> = ["AAPL", "MSFT", "TSLA", "NVDA", "", "brk.b", "GOOGL"]
            .into_iter()
            .map(Ticker::new)
            .collect();
        let batch = BatchGenerator::new(3).generate_all(&tickers, now()).unwrap();
        let sequential: Vec<_> = tickers.iter().map(|t| generate_at(t.as_str(), now())).collect();
        assert_eq!(batch, sequential);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(BatchGenerator::default().generate_all(&[], now()).unwrap().is_empty());
    }

    #[test]
    fn zero_workers_is_clamped() {
        let pool = BatchGenerator::new(0);
        assert_eq!(pool.workers(), 1);
        let out = pool.generate_all(&[Ticker::new("X")], now()).unwrap();
        assert_eq!(out.len(), 1);
    }
}
