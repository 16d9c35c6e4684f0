use super::constants::{BONUS_FOOD_POINTS, MIN_TICK_MS, NORMAL_FOOD_POINTS, SPEED_STEP_MS};
use super::food;
use super::grid::Direction;
use super::state::{GameState, RunStatus};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    AteFood,
    AteBonus,
    HitWall,
}

// One tick: shift the head, check the walls, then settle exactly one of the
// three consumption outcomes. Only the walls end a run; the snake crossing
// its own body is allowed.
pub fn advance(state: &mut GameState, direction: Direction, rng: &mut impl Rng) -> TickOutcome {
    let new_head = state.head().step(direction);
    if !new_head.in_bounds() {
        state.status = RunStatus::GameOver;
        return TickOutcome::HitWall;
    }

    state.snake.push_front(new_head);

    if new_head == state.food {
        // Normal food: the tail still comes off, so the snake keeps its
        // length and only the pace changes. A bonus sharing this cell is
        // discarded by the re-roll.
        state.score += NORMAL_FOOD_POINTS;
        state.tick_ms = state.tick_ms.saturating_sub(SPEED_STEP_MS).max(MIN_TICK_MS);
        state.food = food::spawn_food(rng);
        state.bonus_food = food::spawn_bonus(rng);
        state.snake.pop_back();
        TickOutcome::AteFood
    } else if state.bonus_food == Some(new_head) {
        // Bonus food: no pop plus a duplicated tail segment, net growth of
        // one cell.
        state.score += BONUS_FOOD_POINTS;
        state.bonus_food = None;
        if let Some(tail) = state.snake.back().copied() {
            state.snake.push_back(tail);
        }
        TickOutcome::AteBonus
    } else {
        state.snake.pop_back();
        TickOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::BASE_TICK_MS;
    use crate::game::grid::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn running_state(snake: &[(i32, i32)], food: (i32, i32), bonus: Option<(i32, i32)>) -> GameState {
        let mut state = GameState::new();
        state.snake = snake.iter().map(|&(x, y)| Cell { x, y }).collect();
        state.food = Cell { x: food.0, y: food.1 };
        state.bonus_food = bonus.map(|(x, y)| Cell { x, y });
        state.status = RunStatus::Running;
        state
    }

    fn cells(state: &GameState) -> Vec<(i32, i32)> {
        state.snake.iter().map(|cell| (cell.x, cell.y)).collect()
    }

    #[test]
    fn a_plain_move_translates_without_growing() {
        let mut state = running_state(&[(5, 5), (4, 5), (3, 5)], (10, 10), None);
        let outcome = advance(&mut state, Direction::Right, &mut rng());
        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(cells(&state), vec![(6, 5), (5, 5), (4, 5)]);
        assert_eq!(state.score, 0);
        assert_eq!(state.status, RunStatus::Running);
    }

    #[test]
    fn hitting_a_wall_ends_the_run_and_mutates_nothing_else() {
        let mut state = running_state(&[(19, 5), (18, 5), (17, 5)], (10, 10), None);
        let before = cells(&state);
        let outcome = advance(&mut state, Direction::Right, &mut rng());
        assert_eq!(outcome, TickOutcome::HitWall);
        assert_eq!(state.status, RunStatus::GameOver);
        assert_eq!(cells(&state), before);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_ms, BASE_TICK_MS);
    }

    #[test]
    fn every_wall_is_fatal() {
        let walls = [
            ((0, 5), Direction::Left),
            ((19, 5), Direction::Right),
            ((5, 0), Direction::Up),
            ((5, 19), Direction::Down),
        ];
        for (head, direction) in walls {
            let mut state = running_state(&[head], (10, 10), None);
            assert_eq!(advance(&mut state, direction, &mut rng()), TickOutcome::HitWall);
            assert_eq!(state.status, RunStatus::GameOver);
        }
    }

    #[test]
    fn normal_food_scores_ten_and_keeps_the_length() {
        let mut state = running_state(&[(5, 5), (4, 5), (3, 5)], (6, 5), None);
        let outcome = advance(&mut state, Direction::Right, &mut rng());
        assert_eq!(outcome, TickOutcome::AteFood);
        assert_eq!(state.score, 10);
        assert_eq!(cells(&state), vec![(6, 5), (5, 5), (4, 5)]);
        assert_eq!(state.tick_ms, BASE_TICK_MS - 2);
        assert!(state.food.in_bounds());
        assert_eq!(state.status, RunStatus::Running);
    }

    #[test]
    fn the_tick_interval_floors_at_the_minimum() {
        let mut state = running_state(&[(5, 5), (4, 5), (3, 5)], (6, 5), None);
        state.tick_ms = MIN_TICK_MS + 1;
        advance(&mut state, Direction::Right, &mut rng());
        assert_eq!(state.tick_ms, MIN_TICK_MS);

        state.food = state.head().step(Direction::Right);
        advance(&mut state, Direction::Right, &mut rng());
        assert_eq!(state.tick_ms, MIN_TICK_MS);
    }

    #[test]
    fn bonus_food_scores_thirty_and_grows_by_one() {
        let mut state = running_state(&[(5, 5), (4, 5), (3, 5)], (10, 10), Some((6, 5)));
        let outcome = advance(&mut state, Direction::Right, &mut rng());
        assert_eq!(outcome, TickOutcome::AteBonus);
        assert_eq!(state.score, 30);
        assert_eq!(cells(&state), vec![(6, 5), (5, 5), (4, 5), (3, 5), (3, 5)]);
        assert_eq!(state.bonus_food, None);
        assert_eq!(state.tick_ms, BASE_TICK_MS);
    }

    #[test]
    fn normal_food_wins_when_it_shares_a_cell_with_the_bonus() {
        let mut state = running_state(&[(5, 5), (4, 5), (3, 5)], (6, 5), Some((6, 5)));
        let outcome = advance(&mut state, Direction::Right, &mut rng());
        assert_eq!(outcome, TickOutcome::AteFood);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn an_unconsumed_bonus_survives_plain_moves() {
        let mut state = running_state(&[(5, 5), (4, 5), (3, 5)], (10, 10), Some((15, 15)));
        advance(&mut state, Direction::Right, &mut rng());
        advance(&mut state, Direction::Right, &mut rng());
        assert_eq!(state.bonus_food, Some(Cell { x: 15, y: 15 }));
    }

    // Self-intersection does not end the game. The head may cross the body;
    // only the walls are fatal.
    #[test]
    fn crossing_the_own_body_is_not_fatal() {
        let mut state = running_state(&[(5, 5), (6, 5), (6, 6), (5, 6)], (10, 10), None);
        let outcome = advance(&mut state, Direction::Down, &mut rng());
        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(state.status, RunStatus::Running);
        assert_eq!(cells(&state), vec![(5, 6), (5, 5), (6, 5), (6, 6)]);
    }

    #[test]
    fn score_never_decreases_across_a_run() {
        let mut state = running_state(&[(5, 5), (4, 5), (3, 5)], (6, 5), None);
        let mut rng = rng();
        let mut last_score = 0;
        for _ in 0..10 {
            if state.status != RunStatus::Running {
                break;
            }
            advance(&mut state, Direction::Right, &mut rng);
            assert!(state.score >= last_score);
            last_score = state.score;
        }
    }
}
