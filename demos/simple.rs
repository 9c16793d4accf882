use grid_planner::{AstarSolver, Bounds, Coordinate, ObstacleWorld, Planner};

// In this example a path is found on a 5x5 world with shape
// .....
// ..#..
// S.#.G
// ..#..
// ..#..
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// The only way across the wall is through the gap in the top row.
fn main() {
    let mut world = ObstacleWorld::new(Coordinate::new(0, 2), Coordinate::new(4, 2))
        .with_bounds(Bounds::new(0, 0, 5, 5));
    world.block_rect(Bounds::new(2, 0, 1, 4));
    println!("{}", world);

    match Planner::new(&world, AstarSolver::new()).plan() {
        Ok(plan) if plan.found => {
            println!("A path of cost {:.3} has been found:", plan.cost);
            for p in plan.path {
                println!("{:?}", p);
            }
        }
        Ok(plan) => println!("No path: {}", plan),
        Err(e) => println!("Planning failed: {}", e),
    }
}
