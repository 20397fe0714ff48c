pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CsvBookStore, HttpBookSource, MemoryBookStore};
pub use config::ServiceConfig;
pub use crate::core::{discount::DiscountAnnotator, service::CatalogService};
pub use domain::model::{Book, ReadRequest, ReadResult};
pub use utils::error::{BookshopError, Result};
