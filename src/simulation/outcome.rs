//! Race results and the birth-type roll.
//!
//! A finished race is either [`RaceOutcome::Captured`] or
//! [`RaceOutcome::PopulationLost`]. When the designated agent wins, a single
//! uniform draw picks a [`BirthOutcome`] from fixed cumulative thresholds,
//! checked from the rarest bucket to the most common.

use serde::{Deserialize, Serialize};

/// Approximate probability of triplets.
pub const ODDS_TRIPLETS: f64 = 1.0 / 8000.0;
/// Approximate probability of identical twins.
pub const ODDS_IDENTICAL_TWINS: f64 = 1.0 / 250.0;
/// Approximate probability of fraternal twins.
pub const ODDS_FRATERNAL_TWINS: f64 = 1.0 / 80.0;

/// Draws below this are triplets.
pub const TRIPLETS_THRESHOLD: f64 = ODDS_TRIPLETS;
/// Draws below this (and not triplets) are identical twins.
pub const IDENTICAL_TWINS_THRESHOLD: f64 = ODDS_TRIPLETS + ODDS_IDENTICAL_TWINS;
/// Draws below this (and not rarer) are fraternal twins. Everything above is a single birth.
pub const FRATERNAL_TWINS_THRESHOLD: f64 =
    ODDS_TRIPLETS + ODDS_IDENTICAL_TWINS + ODDS_FRATERNAL_TWINS;

/// How a race ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceOutcome {
    /// A target was captured. For multi-target races this is the lowest-index target.
    Captured {
        /// Captured target.
        target_id: usize,
        /// Capturing agent.
        agent_id: usize,
    },
    /// No agent was left able to capture anything.
    PopulationLost,
}

/// Kind of birth that follows a winning capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BirthOutcome {
    /// The common case.
    Single,
    /// The fertilized egg split.
    IdenticalTwins,
    /// A second egg was fertilized.
    FraternalTwins,
    /// The rarest case.
    Triplets,
}

impl BirthOutcome {
    /// Number of babies.
    pub fn count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::IdenticalTwins | Self::FraternalTwins => 2,
            Self::Triplets => 3,
        }
    }

    /// Headline shown on the results screen.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Single => "It's a SINGLE BABY!",
            Self::IdenticalTwins => "And it's IDENTICAL TWINS!",
            Self::FraternalTwins => "And it's FRATERNAL TWINS!",
            Self::Triplets => "And it's TRIPLETS!",
        }
    }
}

/// Display category handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutcomeType {
    /// Race still running, or won without a birth roll.
    #[default]
    None,
    /// Single birth animation.
    Single,
    /// Splitting embryo animation.
    Identical,
    /// Two separate embryos.
    Fraternal,
    /// Three embryos.
    Triplets,
    /// Everybody was culled or left the arena.
    PopulationLost,
}

impl From<BirthOutcome> for OutcomeType {
    fn from(outcome: BirthOutcome) -> Self {
        match outcome {
            BirthOutcome::Single => Self::Single,
            BirthOutcome::IdenticalTwins => Self::Identical,
            BirthOutcome::FraternalTwins => Self::Fraternal,
            BirthOutcome::Triplets => Self::Triplets,
        }
    }
}

/// Maps a uniform draw in `[0, 1)` to a birth outcome.
pub fn roll(draw: f64) -> BirthOutcome {
    if draw < TRIPLETS_THRESHOLD {
        BirthOutcome::Triplets
    } else if draw < IDENTICAL_TWINS_THRESHOLD {
        BirthOutcome::IdenticalTwins
    } else if draw < FRATERNAL_TWINS_THRESHOLD {
        BirthOutcome::FraternalTwins
    } else {
        BirthOutcome::Single
    }
}
