//! Shared value types: grid cells, pixel positions, directions and agent ids.

use std::fmt;

/// One square of the grid, addressed by column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Cell { col, row }
    }

    /// Neighbouring cell in `direction`, without any wraparound.
    pub fn offset(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.col + dx, self.row + dy)
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A position in continuous screen space, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32) -> Self {
        Pixel { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour expansion order used by the pathfinder.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step (dx, dy) in cell space; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Direction of a single orthogonal step from `from` to `to`, if there is one.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| from.offset(*d) == to)
    }
}

/// Which of the two agents in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentId {
    Player1,
    Player2,
}

impl AgentId {
    pub const BOTH: [AgentId; 2] = [AgentId::Player1, AgentId::Player2];

    pub fn index(self) -> usize {
        match self {
            AgentId::Player1 => 0,
            AgentId::Player2 => 1,
        }
    }

    pub fn other(self) -> AgentId {
        match self {
            AgentId::Player1 => AgentId::Player2,
            AgentId::Player2 => AgentId::Player1,
        }
    }

    /// Short tag used in log lines.
    pub fn tag(self) -> &'static str {
        match self {
            AgentId::Player1 => "P1",
            AgentId::Player2 => "P2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn test_offset_and_between() {
        let c = Cell::new(3, 3);
        assert_eq!(c.offset(Direction::Up), Cell::new(3, 2));
        assert_eq!(c.offset(Direction::Right), Cell::new(4, 3));
        assert_eq!(Direction::between(c, Cell::new(3, 4)), Some(Direction::Down));
        assert_eq!(Direction::between(c, Cell::new(5, 3)), None);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(4, 4)), 8);
        assert_eq!(Cell::new(2, -1).manhattan(Cell::new(-1, 1)), 5);
    }

    #[test]
    fn test_agent_ids() {
        assert_eq!(AgentId::Player1.other(), AgentId::Player2);
        assert_eq!(AgentId::Player2.index(), 1);
    }
}
