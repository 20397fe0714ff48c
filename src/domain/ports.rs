use crate::domain::model::{Book, Decision, ReadRequest, ReadResult, KEY_FIELD};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Books 的外部資料源
#[async_trait]
pub trait BookStore: Send + Sync {
    /// 無條件 select all，依存儲順序回傳
    async fn select_all(&self) -> Result<Vec<Book>>;

    async fn select_by_key(&self, key: &Value) -> Result<Option<Book>> {
        let books = self.select_all().await?;
        Ok(books
            .into_iter()
            .find(|book| book.data.get(KEY_FIELD).is_some_and(|id| keys_match(id, key))))
    }
}

pub trait Authorizer: Send + Sync {
    fn authorize(&self, request: &ReadRequest) -> Decision;
}

/// 讀取成功後執行的 hook，回傳轉換後的結果
pub trait AfterRead: Send + Sync {
    fn name(&self) -> &str;
    fn after_read(&self, result: ReadResult) -> ReadResult;
}

/// 數字鍵比較數值，字串鍵比較文字；`"1"` 與 `1` 視為相同
pub fn keys_match(stored: &Value, requested: &Value) -> bool {
    match (stored, requested) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::String(b)) | (Value::String(b), Value::Number(a)) => {
            b.parse::<f64>().ok() == a.as_f64()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_match() {
        assert!(keys_match(&json!(201), &json!(201)));
        assert!(keys_match(&json!(201), &json!("201")));
        assert!(keys_match(&json!("b-1"), &json!("b-1")));
        assert!(!keys_match(&json!(201), &json!(207)));
        assert!(!keys_match(&json!(null), &json!(201)));
    }
}
