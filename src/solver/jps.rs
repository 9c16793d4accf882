use smallvec::SmallVec;

use crate::config::{PlannerConfig, DEFAULT_MAX_JUMP_DISTANCE};
use crate::error::{PlanError, Result};
use crate::geometry::{Coordinate, Direction};
use crate::solver::{free_neighbour, GridSolver};
use crate::world::World;
use crate::N_SMALLVEC_SIZE;

type JumpSuccessors = SmallVec<[(Coordinate, f64); N_SMALLVEC_SIZE]>;

/// Jump point search. Runs of cells that offer no shorter detour are skipped over; only the
/// cells where the straight-line continuation is about to bend around an obstacle corner (or
/// the goal) become successors, carrying the accumulated cost of the skipped run.
///
/// Diagonal moves may cut corners, matching [AstarSolver](crate::solver::astar::AstarSolver).
///
/// Jump point search needs an enclosed world. Every jump is capped at `max_jump_distance`
/// steps, and a jump into unbounded open space always ends in
/// [PlanError::JumpLimitExceeded]. On an [ObstacleWorld](crate::world::ObstacleWorld) without
/// bounds, plan with [AstarSolver](crate::solver::astar::AstarSolver) and an expansion cap or
/// deadline instead.
#[derive(Clone, Debug)]
pub struct JPSSolver {
    pub max_jump_distance: u32,
}

impl Default for JPSSolver {
    fn default() -> Self {
        JPSSolver::new()
    }
}

impl JPSSolver {
    pub fn new() -> JPSSolver {
        JPSSolver {
            max_jump_distance: DEFAULT_MAX_JUMP_DISTANCE,
        }
    }

    pub fn with_max_jump_distance(max_jump_distance: u32) -> JPSSolver {
        JPSSolver { max_jump_distance }
    }

    /// Headings from `node` towards its forced neighbours when travelling in `dir`.
    ///
    /// Travelling straight, the diagonal 45 degrees off is forced if the cell 90 degrees off
    /// is blocked. Travelling diagonally, the diagonal 90 degrees off is forced if the cell
    /// 135 degrees off (beside the cell we came from) is blocked.
    pub fn forced_directions<W: World>(
        &self,
        world: &W,
        node: &Coordinate,
        dir: Direction,
    ) -> SmallVec<[Direction; 2]> {
        let (free_steps, blocked_steps) = if dir.is_diagonal() { (2, 3) } else { (1, 2) };
        [1, -1]
            .into_iter()
            .filter_map(|sign| {
                let free = dir.rotate_steps(sign * free_steps);
                let blocked = dir.rotate_steps(sign * blocked_steps);
                let forced = free_neighbour(world, node, free).is_some()
                    && free_neighbour(world, node, blocked).is_none();
                forced.then_some(free)
            })
            .collect()
    }

    fn is_forced<W: World>(&self, world: &W, node: &Coordinate, dir: Direction) -> bool {
        !self.forced_directions(world, node, dir).is_empty()
    }

    fn jump_limit_exceeded(&self, origin: Coordinate, direction: Direction) -> PlanError {
        PlanError::JumpLimitExceeded {
            origin,
            direction,
            limit: self.max_jump_distance,
        }
    }

    /// Straight jump in a cardinal direction. Stops at the goal or at a cell with a forced
    /// neighbour; [None] if an obstacle is hit first.
    pub fn jump_axis<W: World>(
        &self,
        world: &W,
        origin: Coordinate,
        direction: Direction,
    ) -> Result<Option<(Coordinate, f64)>> {
        debug_assert!(!direction.is_diagonal());
        let goal = world.goal();
        let mut current = origin;
        let mut cost = 0.0;
        for _ in 0..self.max_jump_distance {
            let Some(next) = free_neighbour(world, &current, direction) else {
                return Ok(None);
            };
            current = next;
            cost += direction.norm();
            if current == goal || self.is_forced(world, &current, direction) {
                return Ok(Some((current, cost)));
            }
        }
        Err(self.jump_limit_exceeded(origin, direction))
    }

    /// Diagonal jump. Besides the goal and forced neighbours, a cell is also a jump point if a
    /// straight jump along either axis component of `direction` finds one from there.
    pub fn jump_diag<W: World>(
        &self,
        world: &W,
        origin: Coordinate,
        direction: Direction,
    ) -> Result<Option<(Coordinate, f64)>> {
        debug_assert!(direction.is_diagonal());
        let goal = world.goal();
        let mut current = origin;
        let mut cost = 0.0;
        for _ in 0..self.max_jump_distance {
            let Some(next) = free_neighbour(world, &current, direction) else {
                return Ok(None);
            };
            current = next;
            cost += direction.norm();
            if current == goal || self.is_forced(world, &current, direction) {
                return Ok(Some((current, cost)));
            }
            for axis in [direction.x_dir(), direction.y_dir()].into_iter().flatten() {
                if self.jump_axis(world, current, axis)?.is_some() {
                    return Ok(Some((current, cost)));
                }
            }
        }
        Err(self.jump_limit_exceeded(origin, direction))
    }

    /// Forced neighbours of `node` followed by the jump points reachable from it, for a
    /// search that arrived at `node` heading in `dir`.
    fn expand_direction<W: World>(
        &self,
        world: &W,
        node: &Coordinate,
        dir: Direction,
        succ: &mut JumpSuccessors,
    ) -> Result<()> {
        for forced in self.forced_directions(world, node, dir) {
            if let Some(p) = node.checked_add(forced) {
                succ.push((p, forced.norm()));
            }
        }
        if dir.is_diagonal() {
            for axis in [dir.x_dir(), dir.y_dir()].into_iter().flatten() {
                succ.extend(self.jump_axis(world, *node, axis)?);
            }
            succ.extend(self.jump_diag(world, *node, dir)?);
        } else {
            succ.extend(self.jump_axis(world, *node, dir)?);
        }
        Ok(())
    }
}

impl GridSolver for JPSSolver {
    type Successors = JumpSuccessors;

    fn successors<W: World>(
        &self,
        world: &W,
        parent: Option<&Coordinate>,
        node: &Coordinate,
    ) -> Result<Self::Successors> {
        let mut succ = SmallVec::new();
        match parent {
            Some(parent_node) => {
                self.expand_direction(world, node, *node - *parent_node, &mut succ)?;
            }
            None => {
                // The start has no heading yet, so search outwards in every direction.
                for dir in Direction::ALL {
                    self.expand_direction(world, node, dir, &mut succ)?;
                }
            }
        }
        Ok(succ)
    }

    fn configure(&mut self, config: &PlannerConfig) {
        self.max_jump_distance = config.max_jump_distance;
    }
}
