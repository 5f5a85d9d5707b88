//! Undo support for catalog mutations.
//!
//! Every successful borrow or return records an [`Action`] together with the
//! [`BookId`] it touched. Undoing pops the latest record and applies its
//! inverse. Undoing never records anything, so there is no redo and the
//! history only shrinks.

use std::fmt;

use crate::catalog::BookId;

/// The state changes that can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Borrowed,
    Returned,
}

impl Action {
    /// The availability a book had before this action was applied.
    pub fn availability_before(self) -> bool {
        match self {
            Action::Borrowed => true,
            Action::Returned => false,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Borrowed => write!(f, "Borrowed"),
            Action::Returned => write!(f, "Returned"),
        }
    }
}

/// The outcome of a successful [`Catalog::undo`](crate::Catalog::undo).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undone {
    /// the action that was reversed
    pub action: Action,
    pub book: BookId,
}

/// LIFO stack of recorded actions.
///
/// Entries refer to books by id only; the catalog owns the books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    entries: Vec<(Action, BookId)>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action, book: BookId) {
        self.entries.push((action, book));
    }

    pub fn pop(&mut self) -> Option<(Action, BookId)> {
        self.entries.pop()
    }

    /// The most recent entry, if any.
    pub fn peek(&self) -> Option<(Action, BookId)> {
        self.entries.last().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_lifo() {
        let mut stack = UndoStack::new();
        assert!(stack.is_empty());
        stack.push(Action::Borrowed, BookId(0));
        stack.push(Action::Returned, BookId(1));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek(), Some((Action::Returned, BookId(1))));
        assert_eq!(stack.pop(), Some((Action::Returned, BookId(1))));
        assert_eq!(stack.pop(), Some((Action::Borrowed, BookId(0))));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn inverse_availability() {
        assert!(Action::Borrowed.availability_before());
        assert!(!Action::Returned.availability_before());
        assert_eq!(Action::Returned.to_string(), "Returned");
    }
}
