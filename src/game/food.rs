use super::constants::{BONUS_FOOD_CHANCE, GRID_HEIGHT, GRID_WIDTH};
use super::grid::Cell;
use rand::Rng;

// Spawns are uniform over the whole grid with no occupancy checks: food may
// land on the snake or on the bonus food. Observable game behavior, kept.
pub fn spawn_food(rng: &mut impl Rng) -> Cell {
    Cell {
        x: rng.gen_range(0..GRID_WIDTH),
        y: rng.gen_range(0..GRID_HEIGHT),
    }
}

pub fn spawn_bonus(rng: &mut impl Rng) -> Option<Cell> {
    if rng.gen::<f64>() < BONUS_FOOD_CHANCE {
        Some(spawn_food(rng))
    } else {
        None
    }
}
