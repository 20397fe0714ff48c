use crate::core::{Book, BookStore, Result};
use crate::utils::error::BookshopError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// 從遠端 OData / JSON 端點讀取 Books
pub struct HttpBookSource {
    endpoint: String,
    client: Client,
}

impl HttpBookSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookStore for HttpBookSource {
    async fn select_all(&self) -> Result<Vec<Book>> {
        tracing::debug!("Making request to book source: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Book source response status: {}", status);

        if !status.is_success() {
            return Err(BookshopError::StoreError {
                message: format!("{} returned HTTP {}", self.endpoint, status),
            });
        }

        let payload: Value = response.json().await?;
        Ok(books_from_payload(payload))
    }
}

/// 支援陣列、OData V4 `{"value": [...]}`、OData V2 `{"d": {"results": [...]}}` 與單一物件
pub fn books_from_payload(payload: Value) -> Vec<Book> {
    match payload {
        Value::Array(items) => items.into_iter().map(Book::from).collect(),
        Value::Object(mut obj) => {
            if let Some(Value::Array(items)) = obj.remove("value") {
                return items.into_iter().map(Book::from).collect();
            }
            if let Some(Value::Object(mut d)) = obj.remove("d") {
                return match d.remove("results") {
                    Some(Value::Array(items)) => items.into_iter().map(Book::from).collect(),
                    _ => vec![Book::new(d)],
                };
            }
            vec![Book::new(obj)]
        }
        Value::Null => Vec::new(),
        other => vec![Book::from(other)],
    }
}
