use smallvec::SmallVec;

use crate::error::Result;
use crate::geometry::{Coordinate, Direction};
use crate::solver::{free_neighbour, GridSolver};
use crate::world::World;
use crate::N_SMALLVEC_SIZE;

/// Plain A*: every free cell of the 8-neighbourhood is a successor.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

/// Free cells around `node` with the length of the step to reach them.
pub(crate) fn neighborhood_points_and_cost<W: World>(
    world: &W,
    node: &Coordinate,
) -> SmallVec<[(Coordinate, f64); N_SMALLVEC_SIZE]> {
    Direction::ALL
        .iter()
        .filter_map(|d| free_neighbour(world, node, *d).map(|p| (p, d.norm())))
        .collect()
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Coordinate, f64); N_SMALLVEC_SIZE]>;

    fn successors<W: World>(
        &self,
        world: &W,
        _parent: Option<&Coordinate>,
        node: &Coordinate,
    ) -> Result<Self::Successors> {
        Ok(neighborhood_points_and_cost(world, node))
    }
}
