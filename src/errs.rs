// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("level total must be non-zero")]
    InvalidLevelTotal,
    #[error("max level {0} is above the supported limit")]
    LevelTooHigh(usize),
    #[error("promotion probability must be in (0, 1), got {0}")]
    InvalidProbability(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
