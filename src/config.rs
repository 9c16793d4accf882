//! Planner configuration.

use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astar_jps::SearchBudget;
use crate::error::{PlanError, Result};

/// Upper bound on the number of cells a single jump may travel before giving up.
pub const DEFAULT_MAX_JUMP_DISTANCE: u32 = 1_000_000;

/// Limits applied to one [Planner](crate::Planner) invocation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannerConfig {
    /// Stop after expanding this many states (None = unlimited).
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_expansions: Option<usize>,

    /// Stop once this much wall-clock time has passed since `plan()` started.
    #[cfg_attr(feature = "serde", serde(default))]
    pub deadline: Option<Duration>,

    /// Steps a single straight or diagonal jump may take. Running past it is an error,
    /// typically caused by jumping into an unbounded open region.
    #[cfg_attr(feature = "serde", serde(default = "default_max_jump_distance"))]
    pub max_jump_distance: u32,
}

#[cfg(feature = "serde")]
fn default_max_jump_distance() -> u32 {
    DEFAULT_MAX_JUMP_DISTANCE
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            deadline: None,
            max_jump_distance: DEFAULT_MAX_JUMP_DISTANCE,
        }
    }
}

impl PlannerConfig {
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_max_jump_distance(mut self, max_jump_distance: u32) -> Self {
        self.max_jump_distance = max_jump_distance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_jump_distance == 0 {
            return Err(PlanError::InvalidConfig(
                "max_jump_distance must be at least 1".to_owned(),
            ));
        }
        if self.deadline == Some(Duration::ZERO) {
            return Err(PlanError::InvalidConfig("deadline must be non-zero".to_owned()));
        }
        Ok(())
    }

    /// Budget for a search starting now.
    pub(crate) fn budget(&self) -> SearchBudget {
        SearchBudget {
            max_expansions: self.max_expansions,
            deadline: self.deadline.map(|d| Instant::now() + d),
        }
    }
}
