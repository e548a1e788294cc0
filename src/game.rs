use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{FOOD_REWARD, GridSize};
use crate::food::spawn_position;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// What ended a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfBite,
}

/// Result of one `step()` call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StepOutcome {
    pub alive: bool,
    pub ate: bool,
    pub terminated: bool,
    pub score: u32,
    /// Set on the tick that ended the run and on every call afterwards.
    pub collision: Option<Collision>,
}

/// Owns the board, the snake, the food, and the score for one run.
///
/// The simulation only advances when the driver calls [`GridSimulation::step`].
#[derive(Debug, Clone)]
pub struct GridSimulation {
    bounds: GridSize,
    start_length: u16,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    running: bool,
    collision: Option<Collision>,
    rng: StdRng,
}

impl GridSimulation {
    /// Creates a simulation whose food placement is seeded from the OS.
    #[must_use]
    pub fn new(bounds: GridSize, start_length: u16) -> Self {
        Self::with_rng(bounds, start_length, StdRng::from_entropy())
    }

    /// Creates a deterministic simulation for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, start_length: u16, seed: u64) -> Self {
        Self::with_rng(bounds, start_length, StdRng::seed_from_u64(seed))
    }

    /// Creates a simulation drawing food cells from `rng`.
    #[must_use]
    pub fn with_rng(bounds: GridSize, start_length: u16, rng: StdRng) -> Self {
        let bounds = GridSize::new(bounds.width, bounds.height);
        let snake = starting_snake(bounds, start_length);
        let mut simulation = Self {
            bounds,
            start_length,
            snake,
            food: None,
            score: 0,
            running: true,
            collision: None,
            rng,
        };
        simulation.reset(bounds, start_length);
        simulation
    }

    /// Starts a new run on a `bounds` board with a `start_length` snake.
    ///
    /// The snake lies horizontally with its head on the center cell, heading
    /// right. `start_length` is clamped so the whole body fits left of center.
    pub fn reset(&mut self, bounds: GridSize, start_length: u16) {
        self.bounds = GridSize::new(bounds.width, bounds.height);
        self.start_length = start_length;
        self.snake = starting_snake(self.bounds, start_length);
        self.score = 0;
        self.running = true;
        self.collision = None;
        self.place_food();
    }

    /// Starts a new run with the current dimensions and start length.
    pub fn restart(&mut self) {
        self.reset(self.bounds, self.start_length);
    }

    /// Queues a heading for the next tick; see [`Snake::request_direction`].
    pub fn request_direction(&mut self, direction: Direction) {
        self.snake.request_direction(direction);
    }

    /// Advances the run by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if !self.running {
            return self.terminal_outcome(false);
        }

        self.snake.commit_direction();
        let candidate = self.snake.next_head_position();

        if !candidate.is_within_bounds(self.bounds) {
            return self.terminate(Collision::Wall, false);
        }

        if self.snake.occupies_except_tail(candidate) {
            return self.terminate(Collision::SelfBite, false);
        }

        let ate = self.food == Some(candidate);
        self.snake.advance_to(candidate, ate);

        if ate {
            self.score += FOOD_REWARD;
            self.place_food();
        }

        // Unreachable while food never sits on the snake, which the pre-move
        // check relies on: eating at the tail cell would keep both copies.
        if self.snake.head_overlaps_body() {
            return self.terminate(Collision::SelfBite, ate);
        }

        StepOutcome {
            alive: true,
            ate,
            terminated: false,
            score: self.score,
            collision: None,
        }
    }

    /// Ordered snake cells, head first.
    pub fn snake_positions(&self) -> impl Iterator<Item = &Position> {
        self.snake.segments()
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell, absent once the board is full.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// Heading of the most recent move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    fn place_food(&mut self) {
        self.food = spawn_position(&mut self.rng, self.bounds, &self.snake);
    }

    fn terminate(&mut self, collision: Collision, ate: bool) -> StepOutcome {
        self.running = false;
        self.collision = Some(collision);
        self.terminal_outcome(ate)
    }

    fn terminal_outcome(&self, ate: bool) -> StepOutcome {
        StepOutcome {
            alive: false,
            ate,
            terminated: true,
            score: self.score,
            collision: self.collision,
        }
    }
}

fn starting_snake(bounds: GridSize, start_length: u16) -> Snake {
    let center_x = bounds.width / 2;
    let center_y = bounds.height / 2;
    let length = start_length.clamp(1, center_x + 1);
    Snake::new(
        Position::new(i32::from(center_x), i32::from(center_y)),
        Direction::Right,
        length,
    )
}
