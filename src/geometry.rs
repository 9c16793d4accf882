//! Integer grid coordinates and the 8 unit headings used to move between them.
use core::fmt;
use std::f64::consts::SQRT_2;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell on the unbounded integer grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Straight-line distance between the two cell centres.
    pub fn euclidean_distance(&self, other: &Coordinate) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Number of king moves needed to get from one cell to the other, ignoring obstacles.
    pub fn move_distance(&self, other: &Coordinate) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// The neighbour in `dir`, or [None] if it lies outside the i32 range.
    pub fn checked_add(&self, dir: Direction) -> Option<Coordinate> {
        Some(Coordinate::new(
            self.x.checked_add(dir.x())?,
            self.y.checked_add(dir.y())?,
        ))
    }

    /// True if every neighbour of this cell is representable.
    pub fn has_neighbours(&self) -> bool {
        self.x != i32::MIN && self.x != i32::MAX && self.y != i32::MIN && self.y != i32::MAX
    }

    /// The 8 cells around this one, in the canonical direction order.
    pub fn moore_neighborhood(&self) -> [Coordinate; 8] {
        Direction::ALL.map(|d| *self + d)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Coordinate {
        Coordinate::new(x, y)
    }
}

impl From<[i32; 2]> for Coordinate {
    fn from([x, y]: [i32; 2]) -> Coordinate {
        Coordinate::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// One of the 8 grid headings. Both components lie in {-1, 0, 1} and are never both zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    dx: i8,
    dy: i8,
}

impl Direction {
    pub const EAST: Direction = Direction { dx: 1, dy: 0 };
    pub const NORTH_EAST: Direction = Direction { dx: 1, dy: 1 };
    pub const NORTH: Direction = Direction { dx: 0, dy: 1 };
    pub const NORTH_WEST: Direction = Direction { dx: -1, dy: 1 };
    pub const WEST: Direction = Direction { dx: -1, dy: 0 };
    pub const SOUTH_WEST: Direction = Direction { dx: -1, dy: -1 };
    pub const SOUTH: Direction = Direction { dx: 0, dy: -1 };
    pub const SOUTH_EAST: Direction = Direction { dx: 1, dy: -1 };

    /// All 8 headings, counter-clockwise starting at east. Each entry is the previous one
    /// rotated by 45 degrees.
    pub const ALL: [Direction; 8] = [
        Direction::EAST,
        Direction::NORTH_EAST,
        Direction::NORTH,
        Direction::NORTH_WEST,
        Direction::WEST,
        Direction::SOUTH_WEST,
        Direction::SOUTH,
        Direction::SOUTH_EAST,
    ];

    /// Builds a heading from its components, returning [None] for the null vector or for
    /// components outside {-1, 0, 1}.
    pub fn new(dx: i32, dy: i32) -> Option<Direction> {
        if (dx, dy) == (0, 0) || dx.abs() > 1 || dy.abs() > 1 {
            None
        } else {
            Some(Direction {
                dx: dx as i8,
                dy: dy as i8,
            })
        }
    }

    pub fn x(&self) -> i32 {
        self.dx as i32
    }

    pub fn y(&self) -> i32 {
        self.dy as i32
    }

    /// Position of this heading in [Direction::ALL].
    pub fn num(&self) -> usize {
        match (self.dx, self.dy) {
            (1, 0) => 0,
            (1, 1) => 1,
            (0, 1) => 2,
            (-1, 1) => 3,
            (-1, 0) => 4,
            (-1, -1) => 5,
            (0, -1) => 6,
            _ => 7,
        }
    }

    pub fn is_diagonal(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    /// Length of one step in this heading: 1 for axis-aligned, sqrt(2) for diagonal.
    pub fn norm(&self) -> f64 {
        if self.is_diagonal() {
            SQRT_2
        } else {
            1.0
        }
    }

    /// Angle of the heading in radians, measured counter-clockwise from east.
    pub fn angle(&self) -> f64 {
        (self.dy as f64).atan2(self.dx as f64)
    }

    /// Component-wise product with `other`. Projecting a diagonal onto an axis-aligned
    /// heading keeps only that axis, e.g. `(1, 1) · (1, 0) = (1, 0)`. Returns [None] when
    /// the product is the null vector.
    pub fn dot(&self, other: &Direction) -> Option<Direction> {
        Direction::new(self.x() * other.x(), self.y() * other.y())
    }

    /// Horizontal constituent of the heading, [None] for pure north/south.
    pub fn x_dir(&self) -> Option<Direction> {
        self.dot(&Direction::EAST)
    }

    /// Vertical constituent of the heading, [None] for pure east/west.
    pub fn y_dir(&self) -> Option<Direction> {
        self.dot(&Direction::NORTH)
    }

    /// Rotates by `steps` multiples of 45 degrees; positive is counter-clockwise.
    pub fn rotate_steps(&self, steps: i32) -> Direction {
        Direction::ALL[(self.num() as i32 + steps).rem_euclid(8) as usize]
    }

    /// Rotates by `angle` radians and snaps each component to the nearest of {-1, 0, 1}.
    /// Exact for multiples of 45 degrees.
    pub fn rotate(&self, angle: f64) -> Direction {
        let theta = self.angle() + angle;
        // One of cos and sin always has magnitude >= 1/sqrt(2), so the result is never null.
        Direction {
            dx: theta.cos().round() as i8,
            dy: theta.sin().round() as i8,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.dx, self.dy)
    }
}

/// Overflows at the edge of the i32 range; see [Coordinate::checked_add].
impl Add<Direction> for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Direction) -> Coordinate {
        Coordinate::new(self.x + rhs.x(), self.y + rhs.y())
    }
}

impl Add<&Direction> for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: &Direction) -> Coordinate {
        self + *rhs
    }
}

/// The heading from `rhs` towards `self`: the sign of each axis delta, not the displacement.
/// The two coordinates must differ.
impl Sub for Coordinate {
    type Output = Direction;

    fn sub(self, rhs: Coordinate) -> Direction {
        debug_assert!(self != rhs, "no heading between identical coordinates");
        Direction {
            dx: self.x.cmp(&rhs.x) as i8,
            dy: self.y.cmp(&rhs.y) as i8,
        }
    }
}
