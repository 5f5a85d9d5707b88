//! A book catalog kept as a singly linked list sorted by title.
//!
//! Books are stored in an arena and chained through `next` links starting at
//! `head`. Titles are ordered and matched case-insensitively. Books are never
//! removed, so a [`BookId`] stays valid for the lifetime of its catalog.
//!
//! # Examples
//!
//! ```
//! use linked_routes::catalog::{Action, Catalog, CatalogError};
//!
//! let mut catalog = Catalog::new();
//! catalog.add("Python Programming", "Guido van Rossum");
//! catalog.add("Clean Code", "Robert C. Martin");
//!
//! catalog.borrow("python programming").unwrap();
//! assert_eq!(
//!     catalog.borrow("Python Programming"),
//!     Err(CatalogError::AlreadyBorrowed("Python Programming".into())),
//! );
//!
//! let undone = catalog.undo().unwrap();
//! assert_eq!(undone.action, Action::Borrowed);
//! assert!(catalog.get(undone.book).unwrap().is_available());
//! ```

use std::iter::FusedIterator;

use thiserror::Error;
use tracing::debug;

pub use book::Book;
pub use undo::{Action, UndoStack, Undone};

use book::fold;

mod book;
mod undo;

/// Identifies a book within the catalog that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub(crate) usize);

/// Recoverable outcomes of catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("book not found: {0}")]
    NotFound(String),
    #[error("book already borrowed: {0}")]
    AlreadyBorrowed(String),
    #[error("book was not borrowed: {0}")]
    NotBorrowed(String),
    #[error("no actions to undo")]
    NothingToUndo,
    #[error("no matching books found for {0:?}")]
    NoMatches(String),
    #[error("no books in library")]
    Empty,
}

struct BookNode {
    book: Book,
    /// folded title, the ordering key
    key: String,
    next: Option<BookId>,
}

#[derive(Default)]
pub struct Catalog {
    nodes: Vec<BookNode>,
    head: Option<BookId>,
    history: UndoStack,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of actions that can still be undone.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.nodes.get(id.0).map(|node| &node.book)
    }

    fn next_of(&self, id: BookId) -> Option<BookId> {
        self.nodes[id.0].next
    }

    /// Iterates over the books in title order.
    pub fn iter(&self) -> Books<'_> {
        Books {
            catalog: self,
            current: self.head,
        }
    }

    /// Iterates over the ids in title order.
    fn ids(&self) -> impl Iterator<Item = BookId> + '_ {
        std::iter::successors(self.head, move |&id| self.next_of(id))
    }

    /// Adds an available book, keeping the list sorted by title.
    ///
    /// The book is linked in before the first book whose title is greater than
    /// or equal to `title`, so among equal titles the newest comes first.
    /// This holds at the head too: a title equal to the current first book's
    /// becomes the new first book rather than being linked in after it.
    /// Duplicates are not rejected.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn add(&mut self, title: impl Into<String>, author: impl Into<String>) -> BookId {
        let book = Book::new(title, author);
        let key = fold(book.title());
        let id = BookId(self.nodes.len());

        // the last book sorting strictly before the new one
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(current) = cursor {
            if self.nodes[current.0].key >= key {
                break;
            }
            prev = Some(current);
            cursor = self.next_of(current);
        }

        debug!(title = book.title(), author = book.author(), "added book");
        self.nodes.push(BookNode {
            book,
            key,
            next: cursor,
        });
        match prev {
            Some(prev) => self.nodes[prev.0].next = Some(id),
            None => self.head = Some(id),
        }
        id
    }

    /// Returns the id of the first book, in title order, whose title equals
    /// `title` ignoring case.
    pub fn find(&self, title: &str) -> Option<BookId> {
        let key = fold(title);
        self.ids().find(|id| self.nodes[id.0].key == key)
    }

    /// Marks the first book titled `title` as borrowed and records the action.
    pub fn borrow(&mut self, title: &str) -> Result<BookId, CatalogError> {
        self.toggle(title, Action::Borrowed)
    }

    /// Marks the first book titled `title` as available again and records the
    /// action.
    pub fn return_book(&mut self, title: &str) -> Result<BookId, CatalogError> {
        self.toggle(title, Action::Returned)
    }

    fn toggle(&mut self, title: &str, action: Action) -> Result<BookId, CatalogError> {
        let id = self
            .find(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_owned()))?;
        let book = &mut self.nodes[id.0].book;
        if book.is_available() != action.availability_before() {
            return Err(match action {
                Action::Borrowed => CatalogError::AlreadyBorrowed(book.title().to_owned()),
                Action::Returned => CatalogError::NotBorrowed(book.title().to_owned()),
            });
        }
        book.set_available(!action.availability_before());
        debug!(title = book.title(), %action, "book status changed");
        self.history.push(action, id);
        Ok(id)
    }

    /// Reverses the most recent borrow or return.
    ///
    /// The reversal itself is not recorded.
    pub fn undo(&mut self) -> Result<Undone, CatalogError> {
        let (action, id) = self.history.pop().ok_or(CatalogError::NothingToUndo)?;
        let book = &mut self.nodes[id.0].book;
        book.set_available(action.availability_before());
        debug!(title = book.title(), %action, "undid action");
        Ok(Undone { action, book: id })
    }

    /// Returns every book whose title or author contains `keyword`, ignoring
    /// case, in title order.
    pub fn search(&self, keyword: &str) -> Result<Vec<&Book>, CatalogError> {
        let found: Vec<_> = self.iter().filter(|book| book.matches(keyword)).collect();
        if found.is_empty() {
            return Err(CatalogError::NoMatches(keyword.to_owned()));
        }
        Ok(found)
    }

    /// Returns all books in title order, or [`CatalogError::Empty`].
    pub fn list_all(&self) -> Result<Books<'_>, CatalogError> {
        if self.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(self.iter())
    }
}

impl<T: Into<String>, A: Into<String>> FromIterator<(T, A)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (T, A)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        catalog.extend(iter);
        catalog
    }
}

impl<T: Into<String>, A: Into<String>> Extend<(T, A)> for Catalog {
    fn extend<I: IntoIterator<Item = (T, A)>>(&mut self, iter: I) {
        for (title, author) in iter {
            self.add(title, author);
        }
    }
}

/// An iterator over the books of a [`Catalog`] in title order.
#[derive(Clone)]
pub struct Books<'a> {
    catalog: &'a Catalog,
    current: Option<BookId>,
}

impl<'a> Iterator for Books<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = &self.catalog.nodes[id.0];
        self.current = node.next;
        Some(&node.book)
    }
}

impl FusedIterator for Books<'_> {}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = Books<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
