//! The book catalog.
//!
//! Books are keyed by [`BookId`] in a `BTreeMap`, so listing is always in id
//! order. Ids are allocated from a high-water mark and are never handed out
//! twice, even after the book holding the highest id is removed.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::{BookId, Price};

/// Author recorded when none is given.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub stock: u32,
    pub price: Price,
    pub added_date: NaiveDate,
}

impl Book {
    /// Whether `needle` occurs in the title, author or description.
    ///
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// The description cut to `max` characters, with `...` appended when cut.
    #[must_use]
    pub fn short_description(&self, max: usize) -> String {
        if self.description.chars().count() > max {
            let cut: String = self.description.chars().take(max).collect();
            format!("{cut}...")
        } else {
            self.description.clone()
        }
    }

    /// Whether any copies are left.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// The mutable fields of a book, as entered in the admin add/edit forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub description: String,
    pub stock: u32,
    pub price: Price,
}

impl BookFields {
    /// Trim text fields and fill in the default author.
    fn normalized(self) -> Self {
        let author = self.author.trim();
        Self {
            title: self.title.trim().to_owned(),
            author: if author.is_empty() {
                UNKNOWN_AUTHOR.to_owned()
            } else {
                author.to_owned()
            },
            description: self.description.trim().to_owned(),
            ..self
        }
    }
}

impl From<&Book> for BookFields {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            stock: book.stock,
            price: book.price,
        }
    }
}

/// All books in the store.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: BTreeMap<BookId, Book>,
    /// Highest id ever assigned, including removed books.
    high_water: i32,
}

impl Catalog {
    /// An empty catalog. The first book added gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The five books the store opens with.
    #[must_use]
    pub fn with_seed_books() -> Self {
        let mut catalog = Self::new();
        let seeds = [
            (
                "Python Basics",
                "John Doe",
                "Introduction to Python programming",
                10,
                250,
            ),
            (
                "AI & ML",
                "Jane Smith",
                "Fundamentals of AI and Machine Learning",
                5,
                400,
            ),
            (
                "Data Science",
                "Alex Johnson",
                "Data analysis and visualization",
                8,
                300,
            ),
            (
                "Web Development",
                "Sarah Williams",
                "Building modern web applications",
                6,
                350,
            ),
            (
                "Cyber Security",
                "Mike Brown",
                "Cybersecurity principles and practices",
                4,
                500,
            ),
        ];
        for (title, author, description, stock, price) in seeds {
            catalog.add(BookFields {
                title: title.to_owned(),
                author: author.to_owned(),
                description: description.to_owned(),
                stock,
                price: Price::from_whole(price),
            });
        }
        catalog
    }

    /// Number of books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// All books ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<&Book> {
        self.books.values().collect()
    }

    /// Look up a book by id.
    #[must_use]
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    pub(crate) fn find_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.get_mut(&id)
    }

    /// Case-insensitive substring search over title, author and description.
    ///
    /// A blank term matches nothing.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Book> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.books
            .values()
            .filter(|book| book.matches(&needle))
            .collect()
    }

    /// The id the next added book will receive.
    #[must_use]
    pub fn next_id(&self) -> BookId {
        let max_existing = self.books.keys().next_back().map_or(0, BookId::as_i32);
        BookId::new(max_existing.max(self.high_water)).next()
    }

    /// Add a book dated today and return its id.
    pub fn add(&mut self, fields: BookFields) -> BookId {
        self.add_dated(fields, Utc::now().date_naive())
    }

    /// Add a book with an explicit `added_date`.
    pub fn add_dated(&mut self, fields: BookFields, added_date: NaiveDate) -> BookId {
        let id = self.next_id();
        let BookFields {
            title,
            author,
            description,
            stock,
            price,
        } = fields.normalized();
        self.books.insert(
            id,
            Book {
                id,
                title,
                author,
                description,
                stock,
                price,
                added_date,
            },
        );
        self.high_water = id.as_i32();
        id
    }

    /// Overwrite the mutable fields of a book. Id and added date are kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no book has this id.
    pub fn update(&mut self, id: BookId, fields: BookFields) -> Result<&Book, StoreError> {
        let book = self.books.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let fields = fields.normalized();
        book.title = fields.title;
        book.author = fields.author;
        book.description = fields.description;
        book.stock = fields.stock;
        book.price = fields.price;
        Ok(book)
    }

    /// Delete a book and return it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no book has this id.
    pub fn remove(&mut self, id: BookId) -> Result<Book, StoreError> {
        self.books.remove(&id).ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(title: &str) -> BookFields {
        BookFields {
            title: title.to_owned(),
            author: "Someone".to_owned(),
            description: String::new(),
            stock: 1,
            price: Price::from_whole(100),
        }
    }

    fn ids(books: &[&Book]) -> Vec<i32> {
        books.iter().map(|b| b.id.as_i32()).collect()
    }

    #[test]
    fn test_seed_catalog() {
        let catalog = Catalog::with_seed_books();
        assert_eq!(ids(&catalog.list()), vec![1, 2, 3, 4, 5]);
        let book = catalog.find(BookId::new(2)).unwrap();
        assert_eq!(book.title, "AI & ML");
        assert_eq!(book.stock, 5);
        assert_eq!(book.price, Price::from_whole(400));
    }

    #[test]
    fn test_first_id_in_empty_catalog_is_one() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.add(fields("First")), BookId::new(1));
    }

    #[test]
    fn test_add_assigns_max_plus_one() {
        let mut catalog = Catalog::with_seed_books();
        catalog.remove(BookId::new(3)).unwrap();
        assert_eq!(catalog.add(fields("New")), BookId::new(6));
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut catalog = Catalog::with_seed_books();
        catalog.remove(BookId::new(5)).unwrap();
        let id = catalog.add(fields("Replacement"));
        assert_eq!(id, BookId::new(6));
        assert!(catalog.find(BookId::new(5)).is_none());
    }

    #[test]
    fn test_search_matches_description_case_insensitively() {
        let catalog = Catalog::with_seed_books();
        let found = catalog.search("VISUALIZATION");
        assert_eq!(ids(&found), vec![3]);
    }

    #[test]
    fn test_search_matches_title_and_author() {
        let catalog = Catalog::with_seed_books();
        assert_eq!(ids(&catalog.search("python")), vec![1]);
        assert_eq!(ids(&catalog.search("smith")), vec![2]);
        assert_eq!(ids(&catalog.search("  Security ")), vec![5]);
    }

    #[test]
    fn test_search_without_match_or_blank_term() {
        let catalog = Catalog::with_seed_books();
        assert!(catalog.search("cooking").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_update_keeps_id_and_date() {
        let mut catalog = Catalog::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let id = catalog.add_dated(fields("Old"), date);
        let mut changed = fields(" New ");
        changed.author = "  ".to_owned();
        changed.stock = 9;

        let book = catalog.update(id, changed).unwrap();
        assert_eq!(book.id, id);
        assert_eq!(book.added_date, date);
        assert_eq!(book.title, "New");
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.stock, 9);
    }

    #[test]
    fn test_update_and_remove_unknown_id() {
        let mut catalog = Catalog::with_seed_books();
        assert_eq!(
            catalog.update(BookId::new(99), fields("x")).unwrap_err(),
            StoreError::NotFound(BookId::new(99))
        );
        assert_eq!(
            catalog.remove(BookId::new(99)).unwrap_err(),
            StoreError::NotFound(BookId::new(99))
        );
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_short_description() {
        let catalog = Catalog::with_seed_books();
        let book = catalog.find(BookId::new(2)).unwrap();
        assert_eq!(book.short_description(30), "Fundamentals of AI and Machine...");
        let book = catalog.find(BookId::new(3)).unwrap();
        assert_eq!(book.short_description(40), "Data analysis and visualization");
    }
}
