//! # grid_planner
//!
//! Shortest paths on an unbounded, integer-indexed 2D grid with a sparse set of blocked cells.
//! Moves go to any of the 8 neighbouring cells and cost their Euclidean length (1 or √2).
//!
//! Two successor strategies plug into the same A* driver: [AstarSolver] expands the full
//! 8-neighbourhood, while [JPSSolver] implements
//! [Jump Point Search](https://en.wikipedia.org/wiki/Jump_point_search), skipping over runs of
//! symmetric cells and only generating jump points. Both find paths of equal cost.
//!
//! ```
//! use grid_planner::{AstarSolver, Bounds, Coordinate, ObstacleWorld, Planner};
//!
//! let mut world = ObstacleWorld::new(Coordinate::new(0, 0), Coordinate::new(2, 2))
//!     .with_bounds(Bounds::new(0, 0, 3, 3));
//! world.block(Coordinate::new(1, 1));
//! let plan = Planner::new(&world, AstarSolver::new()).plan().unwrap();
//! assert!(plan.found);
//! assert_eq!(plan.path.len(), 4);
//! ```
pub mod astar_jps;
pub mod config;
pub mod error;
pub mod geometry;
pub mod planner;
pub mod solver;
pub mod world;

use std::collections::VecDeque;

pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use geometry::{Coordinate, Direction};
pub use planner::{Plan, Planner, SearchStatus};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, jps::JPSSolver, GridSolver};
pub use world::{Bounds, ObstacleWorld, World};

/// Inline capacity of successor lists; the 8-neighbourhood fits without allocating.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Turns waypoints into a path on the grid which can be followed step by step. Consecutive
/// waypoints must lie on a common straight or diagonal line, as jump points do.
pub fn waypoints_to_path(waypoints: Vec<Coordinate>) -> Vec<Coordinate> {
    let mut waypoint_queue = waypoints.into_iter().collect::<VecDeque<Coordinate>>();
    let mut path: Vec<Coordinate> = Vec::new();
    let Some(mut current) = waypoint_queue.pop_front() else {
        return path;
    };
    path.push(current);
    for next in waypoint_queue {
        while current != next {
            current = current + (next - current);
            path.push(current);
        }
    }
    path
}
