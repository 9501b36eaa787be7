use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::{GridSize, INITIAL_SPEED, MIN_SPEED, SPEED_STEP};
use crate::food::Food;
use crate::input::{Command, Direction, Key, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Paused,
    Running,
    Lost,
    Won,
}

impl GameStatus {
    /// Returns true for states only a restart can leave.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

/// Complete mutable game state for one session.
///
/// Only this type writes `status`; the renderer reads it.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    /// Timer pulses per automatic step. Never increases until a restart.
    pub speed: u32,
    /// Free-running pulse counter, modulo `speed`.
    pub tick_count: u32,
    pub status: GameStatus,
    /// Help overlay flag.
    pub help: bool,
    direction: Direction,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a paused game with the help overlay shown, seeded from entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::initial();
        let food = spawn_or_corner(&mut rng, bounds, &snake);

        Self {
            snake,
            food,
            score: 0,
            speed: INITIAL_SPEED,
            tick_count: 0,
            status: GameStatus::Paused,
            help: true,
            direction: Direction::Right,
            bounds,
            rng,
        }
    }

    /// Current board size.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Adopts a new window size; interior limits are derived from it on every step.
    pub fn set_bounds(&mut self, bounds: GridSize) {
        self.bounds = bounds;
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn velocity(&self) -> Position {
        self.direction.velocity()
    }

    /// Starts a fresh round: new body, food, score, speed and heading.
    pub fn restart(&mut self) {
        self.tick_count = 0;
        self.speed = INITIAL_SPEED;
        self.score = 0;
        self.snake = Snake::initial();
        self.direction = Direction::Right;
        self.food = spawn_or_corner(&mut self.rng, self.bounds, &self.snake);
        self.status = GameStatus::Running;
        self.help = false;

        info!("game restarted");
    }

    /// Switches between paused and running. Ignored after the game ended or
    /// while help is shown.
    pub fn toggle_pause(&mut self) {
        if self.help {
            return;
        }

        self.status = match self.status {
            GameStatus::Paused => GameStatus::Running,
            GameStatus::Running => GameStatus::Paused,
            other => other,
        };
    }

    /// Flips the help overlay; showing it pauses a game still in progress.
    pub fn toggle_help(&mut self) {
        self.help = !self.help;
        if self.help && !self.status.is_terminal() {
            self.status = GameStatus::Paused;
        }
    }

    /// Counts one timer pulse and steps when the counter wraps.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.tick_count = (self.tick_count + 1) % self.speed;
        if self.tick_count == 0 {
            self.step();
        }
    }

    /// Advances the snake by one cell and applies capture, growth and collision rules.
    pub fn step(&mut self) {
        self.snake.advance(self.velocity(), self.bounds);

        if self.snake.head() == self.food.position {
            self.score += 1;

            if self.score == self.bounds.interior_cells() {
                self.status = GameStatus::Won;
                info!(score = self.score, "board filled, game won");
                return;
            }

            self.speed = self.speed.saturating_sub(SPEED_STEP).max(MIN_SPEED);
            self.snake.grow();
            debug!(score = self.score, speed = self.speed, "food eaten");

            // The new tail sits on the head; one extra move keeps the head
            // visibly advancing this tick. The extra move never captures.
            self.snake.advance(self.velocity(), self.bounds);

            match Food::spawn(&mut self.rng, self.bounds, &self.snake) {
                Some(food) => self.food = food,
                None => {
                    // Every interior cell is body; the old food is under it.
                    self.status = GameStatus::Won;
                    info!(score = self.score, "no free cell left, game won");
                    return;
                }
            }
        }

        if self.snake.head_overlaps_body() {
            self.status = GameStatus::Lost;
            info!(score = self.score, "snake bit itself, game lost");
        }
    }

    /// Steers towards `requested` and moves at once.
    ///
    /// Repeating the current heading is a manual step; an exact reversal is
    /// refused and only counts as a timer pulse.
    pub fn steer(&mut self, requested: Direction) {
        if requested == self.direction {
            self.step();
        } else if direction_change_is_valid(self.direction, requested) {
            self.direction = requested;
            self.step();
        } else {
            self.tick();
        }
    }

    /// Applies one key. Returns false when the key was not consumed and
    /// should go to the enclosing window.
    #[must_use]
    pub fn handle_key(&mut self, key: Key) -> bool {
        if let Some(command) = key.command() {
            match command {
                Command::TogglePause => self.toggle_pause(),
                Command::ToggleHelp => self.toggle_help(),
                Command::Restart => self.restart(),
            }
            return true;
        }

        if self.status != GameStatus::Running {
            return false;
        }

        match key.direction() {
            Some(direction) => {
                self.steer(direction);
                true
            }
            None => false,
        }
    }
}

fn spawn_or_corner(rng: &mut StdRng, bounds: GridSize, snake: &Snake) -> Food {
    Food::spawn(rng, bounds, snake).unwrap_or_else(|| Food::new(Position { x: 1, y: 1 }))
}
