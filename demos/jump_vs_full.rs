use grid_planner::{
    AstarSolver, Bounds, Coordinate, JPSSolver, ObstacleWorld, Planner, PlannerConfig,
};

// Plans across a 40x20 room with two staggered walls, once with full expansion and once
// with jump point search, and prints how much work each needed.
fn main() {
    let mut world = ObstacleWorld::new(Coordinate::new(1, 1), Coordinate::new(38, 18))
        .with_bounds(Bounds::new(0, 0, 40, 20));
    world.block_rect(Bounds::new(12, 0, 1, 15));
    world.block_rect(Bounds::new(26, 5, 1, 15));
    println!("{}", world);

    let config = PlannerConfig::default().with_max_jump_distance(100);
    let full = Planner::with_config(&world, AstarSolver::new(), config.clone())
        .and_then(|planner| planner.plan());
    let jump = Planner::with_config(&world, JPSSolver::new(), config)
        .and_then(|planner| planner.plan());

    for (name, plan) in [("A*", full), ("JPS", jump)] {
        match plan {
            Ok(plan) => {
                println!("{name}: {plan}");
                println!("  waypoints: {}", plan.waypoints.len());
            }
            Err(e) => println!("{name}: {e}"),
        }
    }
}
