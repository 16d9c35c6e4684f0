use super::grid::Direction;

// Direction requests are filtered against the committed direction, not the
// pending one: a reversal relative to the snake as currently drawn is the
// move that would fold the head back onto the neck.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    current: Direction,
    pending: Direction,
}

impl InputBuffer {
    pub fn new(direction: Direction) -> Self {
        Self {
            current: direction,
            pending: direction,
        }
    }

    pub fn reset(&mut self, direction: Direction) {
        self.current = direction;
        self.pending = direction;
    }

    pub fn set(&mut self, requested: Direction) {
        if requested != self.current.opposite() {
            self.pending = requested;
        }
    }

    pub fn commit(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }

    pub fn current(&self) -> Direction {
        self.current
    }
}
