use crate::core::ReadResult;
use crate::domain::model::BOOKS_ENTITY;
use crate::utils::error::BookshopError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// 集合回傳 `{"@odata.context", "value"}`，單筆回傳物件本身加上 context
pub fn entity_payload(result: ReadResult) -> Value {
    match result {
        ReadResult::Collection(books) => json!({
            "@odata.context": format!("$metadata#{}", BOOKS_ENTITY),
            "value": books,
        }),
        ReadResult::Single(book) => {
            let mut data = book.data;
            data.insert(
                "@odata.context".to_string(),
                Value::String(format!("$metadata#{}/$entity", BOOKS_ENTITY)),
            );
            Value::Object(data)
        }
    }
}

pub fn service_document() -> Value {
    json!({
        "@odata.context": "$metadata",
        "value": [
            {"name": BOOKS_ENTITY, "url": BOOKS_ENTITY}
        ]
    })
}

impl IntoResponse for BookshopError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!("❌ Read failed: {} (Category: {:?})", self, self.category());
        } else {
            tracing::debug!("Read rejected with {}: {}", status, self);
        }

        let body = json!({
            "error": {
                "code": status.as_u16().to_string(),
                "message": self.to_string(),
            }
        });

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}
