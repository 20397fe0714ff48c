use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const BOOKS_ENTITY: &str = "Books";
pub const KEY_FIELD: &str = "ID";

/// 一筆 Book 記錄，欄位形狀由外部資料源決定
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Book {
    pub data: Map<String, Value>,
}

impl Book {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// `title` 缺少或為 null 時回傳 None
    pub fn title(&self) -> Option<&Value> {
        self.data.get("title").filter(|v| !v.is_null())
    }

    /// 數字或可解析為有限數字的字串視為價格，其他情況為 None
    ///
    /// `"inf"`、`"NaN"` 雖然 `f64::from_str` 接受，仍視為無價格。
    pub fn price(&self) -> Option<f64> {
        match self.data.get("price")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
            _ => None,
        }
    }

    pub fn discount(&self) -> Option<u64> {
        self.data.get("discount").and_then(Value::as_u64)
    }

    pub fn key(&self) -> Option<&Value> {
        self.data.get(KEY_FIELD)
    }

    /// 回傳加上 (或覆寫) 欄位後的新記錄
    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.data.insert(name.to_string(), value);
        self
    }
}

impl From<Value> for Book {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(data) => Book { data },
            other => {
                let mut data = Map::new();
                data.insert("value".to_string(), other);
                Book { data }
            }
        }
    }
}

/// 讀取結果：單筆或集合
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult {
    Single(Book),
    Collection(Vec<Book>),
}

impl ReadResult {
    pub fn len(&self) -> usize {
        match self {
            ReadResult::Single(_) => 1,
            ReadResult::Collection(books) => books.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 對每筆記錄套用轉換，保留原本的形狀與順序
    pub fn map_books<F>(self, mut f: F) -> ReadResult
    where
        F: FnMut(Book) -> Book,
    {
        match self {
            ReadResult::Single(book) => ReadResult::Single(f(book)),
            ReadResult::Collection(books) => {
                ReadResult::Collection(books.into_iter().map(f).collect())
            }
        }
    }

    pub fn into_books(self) -> Vec<Book> {
        match self {
            ReadResult::Single(book) => vec![book],
            ReadResult::Collection(books) => books,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }

    pub fn is(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadRequest {
    pub entity: String,
    pub key: Option<Value>,
    pub user: Option<User>,
    /// `$filter`、`$top` 等查詢參數，目前只記錄不處理
    pub query: BTreeMap<String, String>,
}

impl ReadRequest {
    pub fn books() -> Self {
        Self {
            entity: BOOKS_ENTITY.to_string(),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: Value) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_user(mut self, user: Option<User>) -> Self {
        self.user = user;
        self
    }

    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(String),
}
