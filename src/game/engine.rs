use super::{
    action::{Command, Direction},
    config::{ConfigError, GameConfig},
    state::{GameSnapshot, GameStatus, Position, Snake},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

/// Notification emitted by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Food was eaten; carries the new score
    ScoreChanged(u32),
    /// A speed milestone was reached; the host should reschedule its ticks
    SpeedChanged(Duration),
    /// A fatal collision ended the game
    GameOver,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not started, paused, or already over: nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto food and grew
    Ate,
    /// The snake hit a wall or itself
    Died,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub outcome: TickOutcome,
    /// Notifications produced by this tick, in the order they happened
    pub events: Vec<GameEvent>,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            outcome: TickOutcome::Idle,
            events: Vec::new(),
        }
    }

    pub fn ate_food(&self) -> bool {
        self.outcome == TickOutcome::Ate
    }

    pub fn terminated(&self) -> bool {
        self.events.contains(&GameEvent::GameOver)
    }
}

/// The snake simulation.
///
/// A pure state machine: it never sleeps or spawns anything. A host calls
/// [`advance`](Self::advance) on its own clock and forwards player input
/// through [`set_direction`](Self::set_direction), [`start`](Self::start),
/// [`toggle_pause`](Self::toggle_pause) and [`restart`](Self::restart).
pub struct SnakeEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    food: Position,
    score: u32,
    ticks: u32,
    tick_interval: Duration,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl SnakeEngine<StdRng> {
    /// Create an engine seeded from `config.seed`, or from the OS when unset
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SnakeEngine<R> {
    /// Create an engine that places food using the given random source
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let center = Self::center(&config);
        let mut engine = Self {
            tick_interval: config.base_interval(),
            config,
            rng,
            snake: Snake::new(center),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: center,
            score: 0,
            ticks: 0,
            started: false,
            paused: false,
            game_over: false,
        };
        engine.reset();
        Ok(engine)
    }

    fn center(config: &GameConfig) -> Position {
        let mid = (config.board_size / 2) as i32;
        Position::new(mid, mid)
    }

    /// Put the game back to its initial layout.
    ///
    /// Leaves the started flag alone; [`restart`](Self::restart) also stops ticking.
    pub fn reset(&mut self) {
        self.snake = Snake::new(Self::center(&self.config));
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.ticks = 0;
        self.tick_interval = self.config.base_interval();
        self.paused = false;
        self.game_over = false;

        // A fresh one-segment snake always leaves free cells on a valid board.
        if let Some(food) = self.place_food() {
            self.food = food;
        }
    }

    /// Begin accepting ticks and clear any pause
    pub fn start(&mut self) {
        if !self.started {
            info!("tick source started");
            self.started = true;
        }
        self.paused = false;
    }

    /// Flip the pause flag. Ignored once the game is over.
    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
    }

    /// Same as [`toggle_pause`](Self::toggle_pause): pausing a paused game resumes it
    pub fn pause(&mut self) {
        self.toggle_pause();
    }

    /// Stop ticking and start over
    pub fn restart(&mut self) {
        self.started = false;
        self.reset();
        info!("game restarted");
    }

    /// Request a heading for the next tick.
    ///
    /// A reversal of the heading actually applied on the last tick is ignored.
    /// Repeated calls between ticks overwrite each other.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.game_over {
            return;
        }
        if self.direction.is_opposite(direction) {
            debug!(?direction, current = ?self.direction, "reverse turn ignored");
            return;
        }
        self.pending_direction = direction;
    }

    /// Route a host command to the matching operation
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => self.restart(),
            Command::Turn(direction) => self.set_direction(direction),
        }
    }

    /// Execute one tick of the game
    pub fn advance(&mut self) -> StepResult {
        if self.game_over || self.paused || !self.started {
            return StepResult::idle();
        }

        self.direction = self.pending_direction;
        let new_head = self.snake.head().moved_in_direction(self.direction);

        // Wall first: the snake keeps its pre-move body.
        if !new_head.is_within(self.config.board_size) {
            debug!(?new_head, "wall collision");
            return self.finish();
        }

        self.snake.push_head(new_head);

        // The tail has not moved yet, so stepping onto it is fatal too.
        if self.snake.occurrences(new_head) > 1 {
            debug!(?new_head, "self collision");
            return self.finish();
        }

        self.ticks = self.ticks.saturating_add(1);

        if new_head != self.food {
            self.snake.pop_tail();
            return StepResult {
                outcome: TickOutcome::Moved,
                events: Vec::new(),
            };
        }

        self.score = self.score.saturating_add(self.config.score_per_food);
        let mut events = vec![GameEvent::ScoreChanged(self.score)];
        debug!(score = self.score, length = self.snake.len(), "food eaten");

        match self.place_food() {
            Some(food) => self.food = food,
            None => {
                info!(score = self.score, "board full");
                self.game_over = true;
                events.push(GameEvent::GameOver);
                return StepResult {
                    outcome: TickOutcome::Ate,
                    events,
                };
            }
        }

        if self.config.is_speed_milestone(self.score) {
            self.tick_interval = self.config.interval_for_score(self.score);
            debug!(interval_ms = self.tick_interval.as_millis() as u64, "speed milestone");
            events.push(GameEvent::SpeedChanged(self.tick_interval));
        }

        StepResult {
            outcome: TickOutcome::Ate,
            events,
        }
    }

    fn finish(&mut self) -> StepResult {
        self.game_over = true;
        info!(score = self.score, length = self.snake.len(), "game over");
        StepResult {
            outcome: TickOutcome::Died,
            events: vec![GameEvent::GameOver],
        }
    }

    /// Pick a uniformly random free cell by rejection sampling.
    ///
    /// Returns `None` only when the snake covers the whole board.
    fn place_food(&mut self) -> Option<Position> {
        if self.snake.len() >= self.config.cell_count() {
            return None;
        }
        let n = self.config.board_size;
        loop {
            let x = self.rng.gen_range(0..n) as i32;
            let y = self.rng.gen_range(0..n) as i32;
            let pos = Position::new(x, y);

            if !self.snake.contains(pos) {
                debug!(?pos, "food placed");
                return Some(pos);
            }
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Active
        }
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            snake: self.snake.segments(),
            food: self.food,
            score: self.score,
            status: self.status(),
            started: self.started,
            ticks: self.ticks,
            tick_interval: self.tick_interval,
            board_size: self.config.board_size,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Heading applied on the last tick
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Interval the host should tick at
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Put food on `food` and set the score, for host-side tests
    #[cfg(test)]
    pub(crate) fn set_score_and_food(&mut self, score: u32, food: Position) {
        self.score = score;
        self.food = food;
    }
}
