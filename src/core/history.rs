//! Back-stack of previously visited positions.

use crate::core::state::Position;

/// LIFO history for the "back" command. Unbounded; lives as long as the session.
#[derive(Debug, Default)]
pub struct BackStack {
    items: Vec<Position>,
}

impl BackStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: Position) {
        self.items.push(position);
    }

    /// Most recent position, or `None` when there is nowhere to go back to.
    pub fn pop(&mut self) -> Option<Position> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&Position> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
