pub const GRID_WIDTH: i32 = 20;
pub const GRID_HEIGHT: i32 = 20;
pub const CELL_SIZE: u32 = 20;

pub const BASE_TICK_MS: u64 = 150;
pub const MIN_TICK_MS: u64 = 50;
pub const SPEED_STEP_MS: u64 = 2;

pub const NORMAL_FOOD_POINTS: i64 = 10;
pub const BONUS_FOOD_POINTS: i64 = 30;
pub const BONUS_FOOD_CHANCE: f64 = 0.3;

pub const STARTING_LENGTH: usize = 3;
pub const START_HEAD_X: i32 = 5;
pub const START_HEAD_Y: i32 = 5;

pub const INTRO_TICK_MS: u64 = 200;
pub const INTRO_STARTING_LENGTH: usize = 5;
pub const INTRO_HEAD_X: i32 = 10;
pub const INTRO_HEAD_Y: i32 = 10;
pub const INTRO_TURN_PERIOD: u32 = 45;
pub const INTRO_MOVE_PERIOD: u32 = 3;
