//! The world the planner searches: which cells are free, where to start and where to go.
use core::fmt;

use fxhash::FxHashSet;
use itertools::iproduct;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;

/// Read-only view of a grid world. Every cell is free unless the implementation says
/// otherwise, so a world without any bounds is infinite.
pub trait World {
    /// True unless `coord` is occupied.
    fn is_free(&self, coord: Coordinate) -> bool;
    fn start(&self) -> Coordinate;
    fn goal(&self) -> Coordinate;
}

impl<W: World + ?Sized> World for &W {
    fn is_free(&self, coord: Coordinate) -> bool {
        (**self).is_free(coord)
    }
    fn start(&self) -> Coordinate {
        (**self).start()
    }
    fn goal(&self) -> Coordinate {
        (**self).goal()
    }
}

/// Inclusive axis-aligned rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl Bounds {
    /// Rectangle with its lower-left cell at `(x, y)` spanning `width` by `height` cells,
    /// clipped to the i32 range.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Bounds {
        let far_edge = |origin: i32, extent: u32| {
            let edge = i64::from(origin) + i64::from(extent) - 1;
            i32::try_from(edge).unwrap_or(if edge < 0 { i32::MIN } else { i32::MAX })
        };
        Bounds {
            min: Coordinate::new(x, y),
            max: Coordinate::new(far_edge(x, width), far_edge(y, height)),
        }
    }

    /// Smallest rectangle containing every given coordinate.
    pub fn enclosing<I>(coords: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        coords.into_iter().fold(None, |acc, c| {
            Some(match acc {
                None => Bounds { min: c, max: c },
                Some(b) => Bounds {
                    min: Coordinate::new(b.min.x.min(c.x), b.min.y.min(c.y)),
                    max: Coordinate::new(b.max.x.max(c.x), b.max.y.max(c.y)),
                },
            })
        })
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x)
            && (self.min.y..=self.max.y).contains(&coord.y)
    }

    /// Number of columns; zero for an empty rectangle.
    pub fn width(&self) -> u64 {
        span(self.min.x, self.max.x)
    }

    pub fn height(&self) -> u64 {
        span(self.min.y, self.max.y)
    }

    /// Every cell in the rectangle, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        iproduct!(self.min.x..=self.max.x, self.min.y..=self.max.y).map(Coordinate::from)
    }
}

fn span(min: i32, max: i32) -> u64 {
    u64::try_from(i64::from(max) - i64::from(min) + 1).unwrap_or(0)
}

/// [World] backed by a sparse set of blocked cells. Optional [Bounds] close the world off:
/// cells outside them are treated as blocked.
#[derive(Clone, Debug)]
pub struct ObstacleWorld {
    obstacles: FxHashSet<Coordinate>,
    start: Coordinate,
    goal: Coordinate,
    bounds: Option<Bounds>,
}

impl ObstacleWorld {
    pub fn new(start: Coordinate, goal: Coordinate) -> ObstacleWorld {
        ObstacleWorld {
            obstacles: FxHashSet::default(),
            start,
            goal,
            bounds: None,
        }
    }

    pub fn with_obstacles<I>(start: Coordinate, goal: Coordinate, obstacles: I) -> ObstacleWorld
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut world = ObstacleWorld::new(start, goal);
        world.obstacles.extend(obstacles);
        world
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> ObstacleWorld {
        self.bounds = Some(bounds);
        self
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Coordinate> {
        self.obstacles.iter()
    }

    pub fn is_blocked(&self, coord: Coordinate) -> bool {
        self.obstacles.contains(&coord)
    }

    /// Marks `coord` as blocked, returning whether it was free before.
    pub fn block(&mut self, coord: Coordinate) -> bool {
        self.obstacles.insert(coord)
    }

    /// Clears `coord`, returning whether it was blocked before.
    pub fn unblock(&mut self, coord: Coordinate) -> bool {
        self.obstacles.remove(&coord)
    }

    pub fn set(&mut self, coord: Coordinate, blocked: bool) {
        if blocked {
            self.block(coord);
        } else {
            self.unblock(coord);
        }
    }

    pub fn block_rect(&mut self, rect: Bounds) {
        self.obstacles.extend(rect.cells());
    }

    pub fn set_start(&mut self, start: Coordinate) {
        self.start = start;
    }

    pub fn set_goal(&mut self, goal: Coordinate) {
        self.goal = goal;
    }
}

impl World for ObstacleWorld {
    fn is_free(&self, coord: Coordinate) -> bool {
        self.bounds.map_or(true, |b| b.contains(coord)) && !self.obstacles.contains(&coord)
    }
    fn start(&self) -> Coordinate {
        self.start
    }
    fn goal(&self) -> Coordinate {
        self.goal
    }
}

/// Draws the bounded area (or the area spanned by start, goal and obstacles) with the
/// highest row first: `S` start, `G` goal, `#` blocked, `.` free.
impl fmt::Display for ObstacleWorld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let area = self.bounds.or_else(|| {
            Bounds::enclosing(
                [self.start, self.goal]
                    .into_iter()
                    .chain(self.obstacles.iter().copied()),
            )
        });
        let Some(area) = area else {
            return Ok(());
        };
        for y in (area.min.y..=area.max.y).rev() {
            for x in area.min.x..=area.max.x {
                let p = Coordinate::new(x, y);
                let c = if p == self.start {
                    'S'
                } else if p == self.goal {
                    'G'
                } else if self.is_free(p) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_world_is_free_everywhere_but_obstacles() {
        let world = ObstacleWorld::with_obstacles(
            Coordinate::new(0, 0),
            Coordinate::new(3, 3),
            [Coordinate::new(1, 1)],
        );
        assert!(!world.is_free(Coordinate::new(1, 1)));
        assert!(world.is_free(Coordinate::new(-1_000_000, 42)));
        assert!(world.is_free(Coordinate::new(i32::MAX, i32::MIN)));
    }

    #[test]
    fn bounds_close_the_world() {
        let world = ObstacleWorld::new(Coordinate::new(0, 0), Coordinate::new(2, 2))
            .with_bounds(Bounds::new(0, 0, 3, 3));
        assert!(world.is_free(Coordinate::new(2, 2)));
        assert!(!world.is_free(Coordinate::new(3, 2)));
        assert!(!world.is_free(Coordinate::new(0, -1)));
    }

    #[test]
    fn block_and_unblock() {
        let mut world = ObstacleWorld::new(Coordinate::new(0, 0), Coordinate::new(5, 0));
        world.block_rect(Bounds::new(2, -1, 1, 3));
        assert_eq!(world.obstacles().count(), 3);
        assert!(world.is_blocked(Coordinate::new(2, 1)));
        assert!(world.unblock(Coordinate::new(2, 1)));
        assert!(!world.unblock(Coordinate::new(2, 1)));
        world.set(Coordinate::new(4, 4), true);
        assert!(!world.is_free(Coordinate::new(4, 4)));
    }

    #[test]
    fn enclosing_bounds() {
        let b = Bounds::enclosing([Coordinate::new(-2, 3), Coordinate::new(4, -1)]).unwrap();
        assert_eq!(b, Bounds::new(-2, -1, 7, 5));
        assert_eq!(b.cells().count(), 35);
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn huge_bounds_do_not_overflow() {
        let b = Bounds::new(i32::MAX - 1, i32::MIN, u32::MAX, u32::MAX);
        assert_eq!(b.max, Coordinate::new(i32::MAX, i32::MAX));
        assert_eq!(b.width(), 2);
        assert_eq!(b.height(), 1 << 32);
        let empty = Bounds::new(0, 0, 0, 3);
        assert_eq!(empty.width(), 0);
        assert!(!empty.contains(Coordinate::new(0, 0)));
        assert_eq!(Bounds::new(-2, 5, 4, 1).width(), 4);
    }

    #[test]
    fn display_draws_top_row_first() {
        //  ___
        // |..G|
        // |S#.|
        //  ___
        let world = ObstacleWorld::with_obstacles(
            Coordinate::new(0, 0),
            Coordinate::new(2, 1),
            [Coordinate::new(1, 0)],
        )
        .with_bounds(Bounds::new(0, 0, 3, 2));
        assert_eq!(world.to_string(), "..G\nS#.\n");
    }
}
