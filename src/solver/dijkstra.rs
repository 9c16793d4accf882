use smallvec::SmallVec;

use crate::error::Result;
use crate::geometry::Coordinate;
use crate::solver::{astar::neighborhood_points_and_cost, GridSolver};
use crate::world::World;
use crate::N_SMALLVEC_SIZE;

/// Uninformed baseline: full expansion with a zero heuristic, so states are expanded in
/// order of their distance from the start.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Coordinate, f64); N_SMALLVEC_SIZE]>;

    fn successors<W: World>(
        &self,
        world: &W,
        _: Option<&Coordinate>,
        node: &Coordinate,
    ) -> Result<Self::Successors> {
        Ok(neighborhood_points_and_cost(world, node))
    }

    fn heuristic<W: World>(&self, _: &W, _: &Coordinate) -> f64 {
        0.0
    }
}
