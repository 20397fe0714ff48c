use crate::core::{Book, BookStore, Result};
use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};

/// 從 CSV 種子檔讀取 Books，例如 `db/data/my.bookshop-Books.csv`
#[derive(Debug, Clone)]
pub struct CsvBookStore {
    path: PathBuf,
}

impl CsvBookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BookStore for CsvBookStore {
    /// 每次都重新讀檔，檔案錯誤直接往上拋
    async fn select_all(&self) -> Result<Vec<Book>> {
        let content = tokio::fs::read(&self.path).await?;
        let books = parse_books_csv(&content)?;
        tracing::debug!("Loaded {} book(s) from {}", books.len(), self.path.display());
        Ok(books)
    }
}

/// 只有這些欄位會轉成 JSON 數字，其餘欄位保持文字
pub const NUMERIC_COLUMNS: [&str; 3] = ["ID", "stock", "price"];

pub fn parse_books_csv(content: &[u8]) -> Result<Vec<Book>> {
    let delimiter = detect_delimiter(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(content);

    let headers = reader.headers()?.clone();
    let mut books = Vec::new();

    for row in reader.records() {
        let row = row?;
        let mut data = Map::new();
        for (name, cell) in headers.iter().zip(row.iter()) {
            let numeric = NUMERIC_COLUMNS.contains(&name);
            data.insert(name.to_string(), cell_value(cell, numeric));
        }
        books.push(Book::new(data));
    }

    Ok(books)
}

/// 標頭行含 `;` 就用 `;`，否則用 `,`
fn detect_delimiter(content: &[u8]) -> u8 {
    let header = content.split(|b| *b == b'\n').next().unwrap_or_default();
    if header.contains(&b';') {
        b';'
    } else {
        b','
    }
}

fn cell_value(cell: &str, numeric: bool) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if !numeric || has_leading_zero(cell) {
        return Value::String(cell.to_string());
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Some(n) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(cell.to_string())
}

/// `007` 這類值轉成數字會丟失前導零
fn has_leading_zero(cell: &str) -> bool {
    let digits = cell.strip_prefix('-').unwrap_or(cell);
    let mut chars = digits.chars();
    matches!((chars.next(), chars.next()), (Some('0'), Some(c)) if c.is_ascii_digit())
}
