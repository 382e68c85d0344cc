use super::action::Direction;
use std::time::Duration;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies on a square board of the given side
    pub fn is_within(&self, board_size: usize) -> bool {
        let n = board_size as i32;
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// A one-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Check if any segment (head included) sits on `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// How many segments sit on `pos`
    pub fn occurrences(&self, pos: Position) -> usize {
        self.body.iter().filter(|&&segment| segment == pos).count()
    }

    /// Add a new head in front of the current one
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Drop the last segment
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Externally visible game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Paused,
    GameOver,
}

/// Read-only view of the engine, polled once per frame by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot<'a> {
    pub snake: &'a [Position],
    pub food: Position,
    pub score: u32,
    pub status: GameStatus,
    /// Whether the tick source has been started
    pub started: bool,
    /// Ticks that moved the snake since the last reset
    pub ticks: u32,
    pub tick_interval: Duration,
    pub board_size: usize,
}

impl GameSnapshot<'_> {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn is_snake(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
