// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::{
    errs::{
        Error,
        Result,
    },
    level_generator::Seeding,
};

/// The highest level a skip list node can be promoted to. Levels are
/// zero-indexed, so a list built with this default has 21 lanes.
pub const DEFAULT_MAX_LEVEL: usize = 20;

/// The highest `max_level` a [`Config`] accepts. A list never allocates more
/// than `MAX_LEVEL_LIMIT + 1` lanes.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// The chance a node present on level `n` is also present on level `n + 1`.
pub const DEFAULT_P: f64 = 0.5;

/// Construction parameters for a [`SkipList`].
///
/// [`SkipList`]: crate::skiplist::SkipList
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    max_level: usize,
    p: f64,
    seeding: Seeding,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            p: DEFAULT_P,
            seeding: Seeding::Keyed,
        }
    }
}

impl Config {
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    pub fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }

    /// Number of lanes the configuration describes, head included.
    pub fn total(&self) -> usize {
        self.max_level.saturating_add(1)
    }

    pub fn validate(&self) -> Result<()> {
        // p outside (0, 1) either never promotes or never stops promoting
        if !(self.p > 0.0 && self.p < 1.0) {
            return Err(Error::InvalidProbability(self.p));
        }
        if self.max_level > MAX_LEVEL_LIMIT {
            return Err(Error::LevelTooHigh(self.max_level));
        }
        Ok(())
    }
}
