//! Keyboard focus traversal over the card grid.
//!
//! Cards are laid out row by row, `width` per row. Left and right step to
//! the previous and next card in deal order (crossing row ends); up and down
//! jump a whole row. A move that would leave the grid keeps the focus where
//! it is.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Arrow direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Focus traversal for a grid of `len` cards, `width` per row.
///
/// ```
/// use memory_match::cards::CardId;
/// use memory_match::nav::{Direction, GridNavigator};
///
/// let nav = GridNavigator::new(4, 16);
/// assert_eq!(nav.step(CardId::new(1), Direction::Down), CardId::new(5));
/// assert_eq!(nav.step(CardId::new(14), Direction::Down), CardId::new(14));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridNavigator {
    width: usize,
    len: usize,
}

impl GridNavigator {
    /// Create a navigator. A zero width is treated as one card per row.
    #[must_use]
    pub fn new(width: usize, len: usize) -> Self {
        Self {
            width: width.max(1),
            len,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of rows, counting a partial last row.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.len.div_ceil(self.width)
    }

    /// Where focus lands after moving from `from`, or `None` off the grid.
    #[must_use]
    pub fn try_step(&self, from: CardId, direction: Direction) -> Option<CardId> {
        let index = from.index();
        if index >= self.len {
            return None;
        }
        let target = match direction {
            Direction::Left => index.checked_sub(1)?,
            Direction::Right => index + 1,
            Direction::Up => index.checked_sub(self.width)?,
            Direction::Down => index + self.width,
        };
        (target < self.len).then(|| CardId::from(target))
    }

    /// Where focus lands after moving from `from`; stays put at the edges.
    #[must_use]
    pub fn step(&self, from: CardId, direction: Direction) -> CardId {
        self.try_step(from, direction).unwrap_or(from)
    }

    /// Row and column of a card.
    #[must_use]
    pub fn position(&self, card: CardId) -> (usize, usize) {
        (card.index() / self.width, card.index() % self.width)
    }

    /// Card at a row and column, if inside the grid.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Option<CardId> {
        if col >= self.width {
            return None;
        }
        let index = row * self.width + col;
        (index < self.len).then(|| CardId::from(index))
    }
}
