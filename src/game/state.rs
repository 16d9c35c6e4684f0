use super::constants::{BASE_TICK_MS, START_HEAD_X, START_HEAD_Y, STARTING_LENGTH};
use super::food;
use super::grid::Cell;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    NotStarted,
    Running,
    GameOver,
}

// Sole owner of the mutable simulation data for one run. The high score
// outlives runs and lives in HighScoreStore instead.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: VecDeque<Cell>,
    pub food: Cell,
    pub bonus_food: Option<Cell>,
    pub score: i64,
    pub tick_ms: u64,
    pub status: RunStatus,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            snake: VecDeque::new(),
            food: Cell { x: 0, y: 0 },
            bonus_food: None,
            score: 0,
            tick_ms: BASE_TICK_MS,
            status: RunStatus::NotStarted,
        }
    }

    // Full reset, legal from any status. Starting over mid-run is the
    // "try again" action and behaves identically to the first start.
    pub fn start(&mut self, rng: &mut impl Rng) {
        self.snake = starting_snake();
        self.score = 0;
        self.tick_ms = BASE_TICK_MS;
        self.food = food::spawn_food(rng);
        self.bonus_food = food::spawn_bonus(rng);
        self.status = RunStatus::Running;
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }
}

fn starting_snake() -> VecDeque<Cell> {
    (0..STARTING_LENGTH as i32)
        .map(|offset| Cell {
            x: START_HEAD_X - offset,
            y: START_HEAD_Y,
        })
        .collect()
}
