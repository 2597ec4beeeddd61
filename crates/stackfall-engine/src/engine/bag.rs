use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::PieceKind;

/// Deals piece kinds using the 7-bag randomization algorithm.
///
/// # 7-Bag System
///
/// 1. The bag starts out holding one of each of the 7 piece kinds
/// 2. Each draw removes a uniformly random kind from the bag
/// 3. When the bag is empty it is refilled with all 7 kinds
///
/// Every kind therefore appears exactly once in each run of 7 draws that
/// starts at a reset or a refill, and no kind is skipped for more than 12
/// draws in a row.
///
/// The random source is a type parameter so that tests and replays can
/// inject their own generator. The default is a seeded [`Pcg32`].
///
/// # Example
///
/// ```
/// use stackfall_engine::{Bag, BagSeed};
///
/// let mut bag = Bag::with_seed(BagSeed::new(7));
/// let mut kinds: Vec<_> = (0..7).map(|_| bag.next_kind()).collect();
/// kinds.sort_by_key(|kind| *kind as u8);
/// kinds.dedup();
/// assert_eq!(kinds.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct Bag<R = Pcg32> {
    rng: R,
    remaining: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

/// Seed for deterministic piece generation.
///
/// Using the same seed produces the same sequence of pieces. Serialized as a
/// plain integer so it can live in a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BagSeed(u64);

impl BagSeed {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }
}

/// Allows generating random `BagSeed` values with `rng.random()`.
impl Distribution<BagSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BagSeed {
        BagSeed(rng.random())
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Creates a bag seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed.0))
    }
}

impl<R> Bag<R>
where
    R: Rng,
{
    /// Creates a full bag drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        let mut this = Self {
            rng,
            remaining: ArrayVec::new(),
        };
        this.reset();
        this
    }

    /// Removes and returns a random kind, refilling the bag first if it is empty.
    pub fn next_kind(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        let index = self.rng.random_range(0..self.remaining.len());
        self.remaining.remove(index)
    }

    /// Discards the remaining kinds and starts a fresh bag.
    pub fn reset(&mut self) {
        self.remaining.clear();
        self.refill();
    }

    /// Kinds not yet dealt from the current bag, in no particular order.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.remaining
    }

    fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(PieceKind::ALL);
    }
}
