// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::hash::{
    Hash,
    Hasher,
};

use rand::{
    rngs::SmallRng,
    Rng,
    SeedableRng,
};
use siphasher::sip::SipHasher13;

use crate::{
    config::DEFAULT_P,
    errs::{
        Error,
        Result,
    },
};

/// Upon the insertion of a new key, the node is promoted to higher levels (or
/// handed a higher rank) with a probability determined by a `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level
    /// generator.
    fn total(&self) -> usize;
    /// Generate the next random level of the generator's own sequence in the
    /// range `[0, total)`.
    ///
    /// This must never return a level that is `>= self.total()`.
    fn random(&mut self) -> usize;
    /// Generate a level for the node holding `key`. Generators whose levels
    /// depend on the key override this; the default ignores the key and
    /// takes the next value from [`LevelGenerator::random`].
    fn random_for<K: Hash + ?Sized>(&mut self, _key: &K) -> usize {
        self.random()
    }
}

/// Where a generator gets its randomness from for each draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// The generator is reseeded from a hash of the key before every
    /// [`LevelGenerator::random_for`] draw, so a key always lands on the same
    /// level, across instances and runs. Keyless draws continue from the last
    /// seed.
    Keyed,
    /// One evolving random sequence shared by every draw of the instance.
    Stream,
}

/// A level generator which will produce geometrically distributed numbers.
///
/// The probability of generating level `n` is `p` times the probability of
/// generating level `n-1`, with the probability truncated at the maximum number
/// of levels allowed.
#[derive(Debug, Clone)]
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    seeding: Seeding,
    rng: SmallRng, // Fast generator
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// # Panics
    ///
    /// `p` must be between 0 and 1 and will panic otherwise.  Similarly,
    /// `total` must be at greater or equal to 1.
    pub fn new(total: usize, p: f64, seeding: Seeding) -> Self {
        if total == 0 {
            panic!("total must be non-zero.");
        }
        if !(p > 0.0 && p < 1.0) {
            panic!("p must be in (0, 1).");
        }
        GeometricalLevelGenerator {
            total,
            p,
            seeding,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Same as [`GeometricalLevelGenerator::new`], reporting bad parameters
    /// as an error instead of panicking.
    pub fn try_new(total: usize, p: f64, seeding: Seeding) -> Result<Self> {
        if total == 0 {
            return Err(Error::InvalidLevelTotal);
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidProbability(p));
        }
        Ok(Self::new(total, p, seeding))
    }

    /// A keyed generator with the default promotion probability.
    pub fn keyed(total: usize) -> Self {
        Self::new(total, DEFAULT_P, Seeding::Keyed)
    }

    /// A stream generator with the default promotion probability, seeded
    /// from OS entropy.
    pub fn stream(total: usize) -> Self {
        Self::new(total, DEFAULT_P, Seeding::Stream)
    }

    /// A stream generator whose sequence is fully determined by `seed`.
    pub fn seeded(total: usize, p: f64, seed: u64) -> Self {
        let mut generator = Self::new(total, p, Seeding::Stream);
        generator.rng = SmallRng::seed_from_u64(seed);
        generator
    }

    pub fn seeding(&self) -> Seeding {
        self.seeding
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

/// Fixed SipHash keys, so the seed depends on the key alone.
fn key_seed<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    key.hash(&mut hasher);
    hasher.finish()
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut h = 0;
        let mut x = self.p;
        let f = 1.0 - self.rng.gen::<f64>();
        while x > f && h + 1 < self.total {
            h += 1;
            x *= self.p
        }
        h
    }

    fn random_for<K: Hash + ?Sized>(&mut self, key: &K) -> usize {
        if self.seeding == Seeding::Keyed {
            self.rng = SmallRng::seed_from_u64(key_seed(key));
        }
        self.random()
    }

    fn total(&self) -> usize {
        self.total
    }
}
