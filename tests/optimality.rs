/// Compares plan costs against an independent Dijkstra over the explicit cell graph.
use std::collections::HashMap;

use grid_planner::{
    AstarSolver, Bounds, Coordinate, DijkstraSolver, Direction, JPSSolver, ObstacleWorld,
    Planner, World,
};
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::prelude::*;

/// Baseline distance from start to goal, or None if unreachable.
fn baseline_cost(world: &ObstacleWorld, bounds: Bounds) -> Option<f64> {
    let mut graph: UnGraph<Coordinate, f64> = UnGraph::new_undirected();
    let nodes: HashMap<Coordinate, NodeIndex> = bounds
        .cells()
        .filter(|p| world.is_free(*p))
        .map(|p| (p, graph.add_node(p)))
        .collect();
    for (p, &a) in &nodes {
        // Half of the neighbourhood suffices for an undirected graph.
        for d in [
            Direction::EAST,
            Direction::NORTH_EAST,
            Direction::NORTH,
            Direction::NORTH_WEST,
        ] {
            if let Some(&b) = nodes.get(&(*p + d)) {
                graph.add_edge(a, b, d.norm());
            }
        }
    }
    let start = *nodes.get(&world.start())?;
    let goal = *nodes.get(&world.goal())?;
    dijkstra(&graph, start, Some(goal), |e| *e.weight())
        .get(&goal)
        .copied()
}

fn random_world(n: i32, density: f64, rng: &mut StdRng) -> (ObstacleWorld, Bounds) {
    let bounds = Bounds::new(0, 0, n as u32, n as u32);
    let start = Coordinate::new(rng.gen_range(0..n), rng.gen_range(0..n));
    let goal = Coordinate::new(rng.gen_range(0..n), rng.gen_range(0..n));
    let mut world = ObstacleWorld::new(start, goal).with_bounds(bounds);
    for p in bounds.cells() {
        if p != start && p != goal && rng.gen_bool(density) {
            world.block(p);
        }
    }
    (world, bounds)
}

#[test]
fn costs_match_baseline() {
    let mut rng = StdRng::seed_from_u64(7);
    for density in [0.1, 0.25, 0.4] {
        for _ in 0..300 {
            let (world, bounds) = random_world(15, density, &mut rng);
            let expected = baseline_cost(&world, bounds);
            let astar = Planner::new(&world, AstarSolver::new()).plan().unwrap();
            let jps = Planner::new(&world, JPSSolver::new()).plan().unwrap();
            let dijkstra = Planner::new(&world, DijkstraSolver).plan().unwrap();
            match expected {
                Some(cost) => {
                    for plan in [&astar, &jps, &dijkstra] {
                        assert!(plan.found);
                        assert!(
                            (plan.cost - cost).abs() < 1e-6,
                            "planned {} but baseline is {cost}\n{world}",
                            plan.cost
                        );
                    }
                }
                None => {
                    assert!(!astar.found && !jps.found && !dijkstra.found);
                }
            }
        }
    }
}

#[test]
fn wall_with_gap() {
    // .....
    // ..#..
    // S.#.G
    // ..#..
    // ..#..
    let bounds = Bounds::new(0, 0, 5, 5);
    let mut world =
        ObstacleWorld::new(Coordinate::new(0, 2), Coordinate::new(4, 2)).with_bounds(bounds);
    world.block_rect(Bounds::new(2, 0, 1, 4));
    let expected = baseline_cost(&world, bounds).unwrap();
    assert!((expected - 4.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
    let plan = Planner::new(&world, JPSSolver::new()).plan().unwrap();
    assert!((plan.cost - expected).abs() < 1e-9);
}
