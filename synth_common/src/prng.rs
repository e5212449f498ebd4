//! Mulberry32 pseudo-random stream.
//!
//! The generator state is a plain `Copy` value: [`Mulberry32::next`] is a pure
//! transition returning the drawn value together with the successor state.
//! [`Draws`] threads that state through sequential code and counts how many
//! values were consumed, which is what fixes the positional meaning of every
//! derived metric.
//!
//! `Mulberry32` also implements `rand`'s `RngCore`/`SeedableRng`, so it can
//! drive anything written against the `rand` traits.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

use crate::seed::Seed;

const INCREMENT: u32 = 0x6d2b_79f5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32 generator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Generator positioned before the first draw of `seed`.
    pub fn new(seed: Seed) -> Self {
        Self { state: seed.value() }
    }

    /// Raw 32-bit output and successor state.
    pub fn next_raw(self) -> (u32, Self) {
        let a = self.state.wrapping_add(INCREMENT);
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        (t ^ (t >> 14), Self { state: a })
    }

    /// Value in `[0, 1)` and successor state.
    pub fn next(self) -> (f64, Self) {
        let (raw, next) = self.next_raw();
        (f64::from(raw) / TWO_POW_32, next)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        let (raw, next) = self.next_raw();
        *self = next;
        raw
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(Seed(u32::from_le_bytes(seed)))
    }
}

/// Sequential cursor over a Mulberry32 stream.
#[derive(Debug, Clone)]
pub struct Draws {
    state: Mulberry32,
    count: usize,
}

impl Draws {
    /// Cursor over the stream of `seed`.
    pub fn new(seed: Seed) -> Self {
        Self {
            state: Mulberry32::new(seed),
            count: 0,
        }
    }

    /// Cursor over the stream seeded by hashing `key` verbatim.
    pub fn from_key(key: &str) -> Self {
        Self::new(Seed::from_key(key))
    }

    /// Next value in `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        let (value, next) = self.state.next();
        self.state = next;
        self.count += 1;
        value
    }

    /// Number of values drawn so far.
    pub fn count(&self) -> usize {
        self.count
    }
}
