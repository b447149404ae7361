use std::fmt;

/// 1-based index into the linearized N x N grid, range `[1, N*N]`.
///
/// Movement is plain index arithmetic (+-1 for columns, +-N for rows), so a
/// step off the left or right edge stays numerically in range and is only
/// caught by the per-direction modulo checks in the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position(pub i32);

impl Position {
    pub fn offset(self, delta: i32) -> Position {
        Position(self.0 + delta)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Signed index delta of one step on a board with side `board_side`.
    pub fn delta(&self, board_side: i32) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up => -board_side,
            Direction::Down => board_side,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Ended,
}

/// Diagnostic tag attached to the `Ended` transition. Never drives control
/// flow on the caller side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrashReason {
    OwnBody,
    Wall,
}
