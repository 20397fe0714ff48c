use crate::core::{AfterRead, Book, ReadResult};
use serde_json::Value;

pub const HIGH_PRICE_THRESHOLD: f64 = 100.0;
pub const MID_PRICE_THRESHOLD: f64 = 50.0;

pub const HIGH_DISCOUNT: u64 = 15;
pub const MID_DISCOUNT: u64 = 5;
pub const NO_DISCOUNT: u64 = 0;

/// 依價格計算折扣；沒有 title 的記錄回傳 None
///
/// 門檻為嚴格大於：價格 100 落在 5，價格 50 落在 0。
/// 缺少價格等同兩個比較都不成立。
pub fn discount_for(book: &Book) -> Option<u64> {
    book.title()?;

    let discount = match book.price() {
        Some(price) if price > HIGH_PRICE_THRESHOLD => HIGH_DISCOUNT,
        Some(price) if price > MID_PRICE_THRESHOLD => MID_DISCOUNT,
        _ => NO_DISCOUNT,
    };
    Some(discount)
}

pub fn annotate(book: Book) -> Book {
    match discount_for(&book) {
        Some(discount) => book.with_field("discount", Value::from(discount)),
        None => book,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountAnnotator;

impl DiscountAnnotator {
    pub fn new() -> Self {
        Self
    }

    pub fn annotate(&self, result: ReadResult) -> ReadResult {
        result.map_books(annotate)
    }
}

impl AfterRead for DiscountAnnotator {
    fn name(&self) -> &str {
        "discount"
    }

    fn after_read(&self, result: ReadResult) -> ReadResult {
        let annotated = self.annotate(result);
        tracing::debug!("Annotated {} book(s) with discounts", annotated.len());
        annotated
    }
}
