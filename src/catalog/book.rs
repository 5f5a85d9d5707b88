use std::fmt;

/// A single catalog entry.
///
/// Titles compare case-insensitively; the catalog keeps a folded copy of the
/// title next to each book so that ordering and lookups do not re-fold it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    title: String,
    author: String,
    available: bool,
}

impl Book {
    /// Creates an available book.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            available: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Returns `true` if `keyword` occurs in the title or the author,
    /// ignoring case.
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = fold(keyword);
        fold(&self.title).contains(&keyword) || fold(&self.author).contains(&keyword)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.available { "Available" } else { "Borrowed" };
        write!(f, "{} by {} [{}]", self.title, self.author, status)
    }
}

/// Case-folds a string for comparisons.
pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn display_shows_status() {
        let mut book = Book::new("Clean Code", "Robert C. Martin");
        assert_eq!(book.to_string(), "Clean Code by Robert C. Martin [Available]");
        book.set_available(false);
        assert_eq!(book.to_string(), "Clean Code by Robert C. Martin [Borrowed]");
    }

    #[test]
    fn matches_title_or_author() {
        let book = Book::new("Data Structures", "Narasimha Karumanchi");
        assert!(book.matches("struct"));
        assert!(book.matches("NARASIMHA"));
        assert!(book.matches(""));
        assert!(!book.matches("Python"));
    }
}
