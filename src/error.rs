//! Error types for planning.

use thiserror::Error;

use crate::geometry::{Coordinate, Direction};

/// Failures that stop a plan outright. Not finding a path is not one of them: that is a
/// regular [Plan](crate::Plan) with `found == false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("start ({0}) lies inside an obstacle")]
    StartBlocked(Coordinate),

    #[error("goal ({0}) lies inside an obstacle")]
    GoalBlocked(Coordinate),

    #[error("({0}) is too close to the edge of the coordinate range to plan from")]
    CoordinateOutOfRange(Coordinate),

    #[error("heuristic estimate at ({0}) is not finite")]
    NonFiniteHeuristic(Coordinate),

    #[error("jump from ({origin}) towards {direction} ran past {limit} steps without a jump point")]
    JumpLimitExceeded {
        origin: Coordinate,
        direction: Direction,
        limit: u32,
    },

    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
