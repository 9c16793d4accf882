use itertools::Itertools;

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::geometry::{Coordinate, Direction};
use crate::world::World;

pub mod astar;
pub mod dijkstra;
pub mod jps;

/// The neighbour of `node` in `dir` if it is free. Cells past the edge of the i32 range count
/// as blocked.
pub(crate) fn free_neighbour<W: World>(
    world: &W,
    node: &Coordinate,
    dir: Direction,
) -> Option<Coordinate> {
    node.checked_add(dir).filter(|p| world.is_free(*p))
}

/// A successor strategy: which states follow a given state, at what cost, and how far the
/// goal is estimated to be.
pub trait GridSolver {
    type Successors: IntoIterator<Item = (Coordinate, f64)>;

    /// Successors of `node` paired with the cost of reaching each from `node`. `parent` is
    /// the state `node` was reached from, [None] for the start. No ordering is implied.
    fn successors<W: World>(
        &self,
        world: &W,
        parent: Option<&Coordinate>,
        node: &Coordinate,
    ) -> Result<Self::Successors>;

    /// Euclidean distance to the goal. Admissible and consistent for 8-connected moves
    /// costing their Euclidean length.
    fn heuristic<W: World>(&self, world: &W, node: &Coordinate) -> f64 {
        node.euclidean_distance(&world.goal())
    }

    /// Cost of moving in a straight or diagonal line from `p1` to `p2`.
    fn cost(&self, p1: &Coordinate, p2: &Coordinate) -> f64 {
        p1.euclidean_distance(p2)
    }

    /// Picks up any solver-specific limits from the planner configuration.
    fn configure(&mut self, _config: &PlannerConfig) {}

    /// Summed cost of a path made of straight or diagonal segments.
    fn path_cost(&self, path: &[Coordinate]) -> f64 {
        path.iter()
            .tuple_windows()
            .map(|(p1, p2)| self.cost(p1, p2))
            .sum()
    }
}
