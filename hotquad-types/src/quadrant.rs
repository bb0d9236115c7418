//! Child slots and cardinal directions.

use serde::{Deserialize, Serialize};

/// A child slot of a subdivided node.
///
/// `y` grows downward from the box origin, so the northern quadrants share
/// the parent's origin row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// A cardinal direction used for neighbor lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    /// Child order used for storage, traversal and export.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Position of this slot in [`Quadrant::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }

    pub const fn is_north(self) -> bool {
        matches!(self, Quadrant::NorthWest | Quadrant::NorthEast)
    }

    pub const fn is_west(self) -> bool {
        matches!(self, Quadrant::NorthWest | Quadrant::SouthWest)
    }

    /// Whether this slot lies on its parent's edge in `direction`.
    ///
    /// A slot that does not face a direction has its neighbor in that
    /// direction under the same parent.
    pub const fn faces(self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.is_north(),
            Direction::South => !self.is_north(),
            Direction::West => self.is_west(),
            Direction::East => !self.is_west(),
        }
    }

    /// Reflect across the axis crossed when moving in `direction`.
    ///
    /// ```
    /// use hotquad_types::quadrant::{Direction, Quadrant};
    ///
    /// assert_eq!(Quadrant::SouthWest.mirror(Direction::North), Quadrant::NorthWest);
    /// assert_eq!(Quadrant::NorthEast.mirror(Direction::East), Quadrant::NorthWest);
    /// ```
    pub const fn mirror(self, direction: Direction) -> Quadrant {
        match direction {
            Direction::North | Direction::South => match self {
                Quadrant::NorthWest => Quadrant::SouthWest,
                Quadrant::NorthEast => Quadrant::SouthEast,
                Quadrant::SouthWest => Quadrant::NorthWest,
                Quadrant::SouthEast => Quadrant::NorthEast,
            },
            Direction::East | Direction::West => match self {
                Quadrant::NorthWest => Quadrant::NorthEast,
                Quadrant::NorthEast => Quadrant::NorthWest,
                Quadrant::SouthWest => Quadrant::SouthEast,
                Quadrant::SouthEast => Quadrant::SouthWest,
            },
        }
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
