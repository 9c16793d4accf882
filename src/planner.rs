//! The search driver: validates the world, runs A* with a [GridSolver] and packages the result.
use core::fmt;

use log::{debug, info};

use crate::astar_jps::{SearchContext, SearchOutcome};
use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::geometry::Coordinate;
use crate::solver::GridSolver;
use crate::waypoints_to_path;
use crate::world::World;

/// How a plan ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The goal was reached.
    Found,
    /// Every reachable state was expanded without reaching the goal.
    Exhausted,
    /// The expansion cap or deadline was hit first.
    Interrupted,
}

/// Outcome of [Planner::plan].
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub found: bool,
    /// Start to goal inclusive, one 8-connected step at a time. Empty unless `found`.
    pub path: Vec<Coordinate>,
    /// The states the search actually chained together; equal to `path` for full expansion,
    /// the jump points for jump point search.
    pub waypoints: Vec<Coordinate>,
    /// Total path cost, infinite when no path was found.
    pub cost: f64,
    /// Number of states expanded.
    pub expansions: usize,
    pub status: SearchStatus,
}

impl Plan {
    fn failed(status: SearchStatus, expansions: usize) -> Plan {
        Plan {
            found: false,
            path: Vec::new(),
            waypoints: Vec::new(),
            cost: f64::INFINITY,
            expansions,
            status,
        }
    }

    /// Path length in steps.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found {
            write!(
                f,
                "Plan {{ found: true, steps: {}, cost: {:.3}, expansions: {} }}",
                self.steps(),
                self.cost,
                self.expansions
            )
        } else {
            write!(
                f,
                "Plan {{ found: false, status: {:?}, expansions: {} }}",
                self.status, self.expansions
            )
        }
    }
}

/// Plans a path through one [World] with one [GridSolver]. Every call to [plan](Self::plan)
/// gets its own state table; nothing carries over between calls.
#[derive(Clone, Debug)]
pub struct Planner<'w, W, S> {
    world: &'w W,
    solver: S,
    config: PlannerConfig,
}

impl<'w, W: World, S: GridSolver> Planner<'w, W, S> {
    /// Planner with the default, unlimited configuration.
    pub fn new(world: &'w W, mut solver: S) -> Self {
        let config = PlannerConfig::default();
        solver.configure(&config);
        Planner {
            world,
            solver,
            config,
        }
    }

    pub fn with_config(world: &'w W, mut solver: S, config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        solver.configure(&config);
        Ok(Planner {
            world,
            solver,
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    fn heuristic(&self, node: &Coordinate) -> Result<f64> {
        let h = self.solver.heuristic(self.world, node);
        if h.is_finite() {
            Ok(h)
        } else {
            Err(PlanError::NonFiniteHeuristic(*node))
        }
    }

    /// Searches for a cheapest path from the world's start to its goal.
    ///
    /// An unreachable goal is a regular outcome with `found == false`. A start or goal inside
    /// an obstacle or on the outermost row or column of the i32 range is an error, as are a
    /// non-finite heuristic and a runaway jump.
    pub fn plan(&self) -> Result<Plan> {
        let start = self.world.start();
        let goal = self.world.goal();
        for endpoint in [start, goal] {
            if !endpoint.has_neighbours() {
                debug!("Rejecting plan: {} lies on the edge of the range", endpoint);
                return Err(PlanError::CoordinateOutOfRange(endpoint));
            }
        }
        if !self.world.is_free(start) {
            debug!("Rejecting plan: start {} is blocked", start);
            return Err(PlanError::StartBlocked(start));
        }
        if !self.world.is_free(goal) {
            debug!("Rejecting plan: goal {} is blocked", goal);
            return Err(PlanError::GoalBlocked(goal));
        }
        info!("Planning from ({}) to ({})", start, goal);

        let mut ct: SearchContext<Coordinate, f64> = SearchContext::new();
        let outcome = ct.astar_jps(
            &start,
            |parent, node| self.solver.successors(self.world, parent, node),
            |node| self.heuristic(node),
            |node| *node == goal,
            &self.config.budget(),
        )?;
        let expansions = ct.expansions();

        Ok(match outcome {
            SearchOutcome::Found { path, cost } => {
                info!(
                    "Found path with {} waypoints, cost {:.3}, after {} expansions",
                    path.len(),
                    cost,
                    expansions
                );
                Plan {
                    found: true,
                    path: waypoints_to_path(path.clone()),
                    waypoints: path,
                    cost,
                    expansions,
                    status: SearchStatus::Found,
                }
            }
            SearchOutcome::Exhausted => {
                info!("No path from ({}) to ({})", start, goal);
                Plan::failed(SearchStatus::Exhausted, expansions)
            }
            SearchOutcome::Interrupted => {
                debug!("Search budget ran out after {} expansions", expansions);
                Plan::failed(SearchStatus::Interrupted, expansions)
            }
        })
    }
}
