use crate::core::{Book, BookStore, Result};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct MemoryBookStore {
    books: Vec<Book>,
}

impl MemoryBookStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Book::from).collect())
    }

    /// 內建示範資料
    pub fn sample() -> Self {
        Self::from_values(vec![
            serde_json::json!({"ID": 201, "title": "Wuthering Heights", "stock": 12, "price": 11.11}),
            serde_json::json!({"ID": 207, "title": "Jane Eyre", "stock": 11, "price": 12.34}),
            serde_json::json!({"ID": 251, "title": "The Raven", "stock": 333, "price": 63.5}),
            serde_json::json!({"ID": 252, "title": "Eleonora", "stock": 555, "price": 101.0}),
            serde_json::json!({"ID": 271, "title": "Catweazle", "stock": 22, "price": 150}),
        ])
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn select_all(&self) -> Result<Vec<Book>> {
        Ok(self.books.clone())
    }
}
