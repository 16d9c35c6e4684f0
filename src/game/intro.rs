use super::constants::{
    INTRO_HEAD_X, INTRO_HEAD_Y, INTRO_MOVE_PERIOD, INTRO_STARTING_LENGTH, INTRO_TURN_PERIOD,
};
use super::grid::{Cell, Direction};
use rand::Rng;
use std::collections::VecDeque;

const TURN_CHOICES: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

// Attract-mode snake shown while no run is active. Purely decorative: it
// wanders, wraps at the edges instead of colliding, and never grows.
#[derive(Debug, Clone)]
pub struct IntroSnake {
    pub body: VecDeque<Cell>,
    pub direction: Direction,
    timer: u32,
}

impl IntroSnake {
    pub fn new() -> Self {
        let body = (0..INTRO_STARTING_LENGTH as i32)
            .map(|offset| Cell {
                x: INTRO_HEAD_X - offset,
                y: INTRO_HEAD_Y,
            })
            .collect();
        Self {
            body,
            direction: Direction::Right,
            timer: 0,
        }
    }

    // Returns true when the snake actually moved. The direction changes on
    // every 45th timer step and movement happens on every 3rd, so the wander
    // reads as lazy rather than frantic.
    pub fn step(&mut self, rng: &mut impl Rng) -> bool {
        self.timer = self.timer.wrapping_add(1);

        if self.timer % INTRO_TURN_PERIOD == 0 {
            self.direction = TURN_CHOICES[rng.gen_range(0..TURN_CHOICES.len())];
        }

        if self.timer % INTRO_MOVE_PERIOD != 0 {
            return false;
        }

        let head = self.body[0].step(self.direction).wrapped();
        self.body.push_front(head);
        self.body.pop_back();
        true
    }
}
