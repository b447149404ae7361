use crate::log;

use super::rng::EngineRng;
use super::settings::EngineSettings;
use super::snake::Snake;
use super::types::{CrashReason, Direction, GameStatus, Position};

/// Read-only view of the engine state, rebuilt after every command and tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub segments: Vec<Position>,
    pub apple: Option<Position>,
    pub score: u32,
    pub status: GameStatus,
    pub crash_reason: Option<CrashReason>,
}

/// The simulation state machine. Owns every piece of game state; callers
/// drive it through commands and read it through [`GameSnapshot`].
///
/// Expects validated settings (see [`EngineSettings::validate`]).
pub struct GameEngine {
    board_side: i32,
    snake: Snake,
    direction: Direction,
    status: GameStatus,
    apple: Option<Position>,
    score: u32,
    accepting_input: bool,
    crash_reason: Option<CrashReason>,
    initial_position: Position,
    rng: EngineRng,
}

impl GameEngine {
    pub fn new(settings: &EngineSettings, mut rng: EngineRng) -> Self {
        let board_side = settings.board_side as i32;
        let initial_position = Position(rng.random_range(1..=board_side * board_side));
        log!(
            "engine created: board {}x{}, start cell {}, seed {}",
            board_side,
            board_side,
            initial_position,
            rng.seed()
        );
        Self {
            board_side,
            snake: Snake::new(initial_position),
            direction: Direction::Right,
            status: GameStatus::Idle,
            apple: None,
            score: 0,
            accepting_input: true,
            crash_reason: None,
            initial_position,
            rng,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            segments: self.snake.segments().to_vec(),
            apple: self.apple,
            score: self.score,
            status: self.status,
            crash_reason: self.crash_reason,
        }
    }

    /// Honors at most one direction change per tick: the first call closes the
    /// input gate and later calls are ignored until a tick re-arms it.
    /// Reversing straight onto the second segment is rejected.
    pub fn set_direction(&mut self, requested: Direction) {
        if !self.accepting_input {
            return;
        }
        self.accepting_input = false;
        if requested.is_opposite(&self.direction) {
            return;
        }
        self.direction = requested;
    }

    /// One simulation step. No-op unless the game is running.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }
        self.accepting_input = true;

        let new_head = self.snake.head().offset(self.direction.delta(self.board_side));

        // Self-collision runs against the body with the tail already vacated,
        // and before the wall check: a step that wraps across an edge onto a
        // body cell counts as hitting the body.
        if self.snake.advanced_body().contains(&new_head) {
            self.end(CrashReason::OwnBody);
            return;
        }
        if self.hits_wall(new_head) {
            self.end(CrashReason::Wall);
            return;
        }

        if self.apple == Some(new_head) {
            self.score += 1;
            self.snake.grow(new_head);
            log!("apple eaten at {}, score {}", new_head, self.score);
            self.apple = place_apple(&self.snake, self.board_side, &mut self.rng);
            if let Some(apple) = self.apple {
                log!("apple placed at {}", apple);
            }
        } else {
            self.snake.advance(new_head);
        }
    }

    /// Wall hits are detected from the linear index alone. Left/right edges
    /// wrap numerically into the neighboring row, so the two horizontal checks
    /// are asymmetric modulo conditions; vertical steps simply leave `[1, N*N]`.
    fn hits_wall(&self, new_head: Position) -> bool {
        let n = self.board_side;
        match self.direction {
            Direction::Right => new_head.0 % n == 1,
            Direction::Left => new_head.0 % n == 0,
            Direction::Down => new_head.0 > n * n,
            Direction::Up => new_head.0 < 1,
        }
    }

    fn end(&mut self, reason: CrashReason) {
        self.status = GameStatus::Ended;
        self.crash_reason = Some(reason);
        log!("game ended: {:?}, final score {}", reason, self.score);
    }

    /// Starts (or resumes) the game. A game that already ended is reset first;
    /// an apple is placed lazily if none is on the board.
    pub fn start(&mut self) {
        if self.status == GameStatus::Ended {
            self.reset();
        }
        if self.apple.is_none() {
            self.apple = place_apple(&self.snake, self.board_side, &mut self.rng);
            if let Some(apple) = self.apple {
                log!("apple placed at {}", apple);
            }
        }
        self.status = GameStatus::Running;
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
        }
    }

    /// Back to the construction-time state: the same initial cell, facing
    /// right, no apple, score 0, idle. The input gate is deliberately left
    /// alone; the next tick re-arms it.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.initial_position);
        self.direction = Direction::Right;
        self.apple = None;
        self.score = 0;
        self.status = GameStatus::Idle;
        self.crash_reason = None;
    }

    #[cfg(test)]
    fn set_state(
        &mut self,
        segments: Vec<Position>,
        direction: Direction,
        apple: Option<Position>,
        status: GameStatus,
    ) {
        self.snake = Snake::from_segments(segments);
        self.direction = direction;
        self.apple = apple;
        self.status = status;
    }

    #[cfg(test)]
    fn direction(&self) -> Direction {
        self.direction
    }
}

/// Rejection sampling over the whole board, retrying occupied cells. A fully
/// occupied board yields no apple rather than looping forever; in practice a
/// collision ends the game long before the snake fills the grid.
fn place_apple(snake: &Snake, board_side: i32, rng: &mut EngineRng) -> Option<Position> {
    let capacity = board_side * board_side;
    if snake.len() as i32 >= capacity {
        return None;
    }
    loop {
        let candidate = Position(rng.random_range(1..=capacity));
        if !snake.contains(candidate) {
            return Some(candidate);
        }
    }
}
