use std::collections::VecDeque;

use crate::{Coords, TermInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Snake body, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
    /// Direction of the last move.
    direction: Direction,
    pending: Option<Direction>,
}

impl Snake {
    /// Builds a straight snake of `size` cells with its head at `pos`,
    /// trailing away from `direction`.
    pub fn new(pos: Coords, size: i16, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();

        let body = (0..size as i32)
            .map(|i| (pos.0 as i32 - dx * i, pos.1 as i32 - dy * i))
            .map(|(x, y)| (x as TermInt, y as TermInt))
            .collect();
        Snake { body, direction, pending: None }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn body(&self) -> impl Iterator<Item = &Coords> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body().any(|p| p == pos)
    }

    pub fn push_head(&mut self, pos: Coords) {
        self.body.push_front(pos);
    }

    pub fn pop_tail(&mut self) -> Option<Coords> {
        self.body.pop_back()
    }

    /// Queues a turn for the next move. Turns are checked against the
    /// direction of the last move, so reversing into the neck is ignored
    /// however many turns pile up in between.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.pending = Some(new_direction);
        }
    }

    /// Commits the queued turn, if any. Called once per move.
    pub fn apply_turn(&mut self) {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }
}
