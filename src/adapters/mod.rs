// Adapters layer: concrete book stores (csv seed files, remote http, in-memory).

pub mod csv_store;
pub mod http_source;
pub mod memory_store;

pub use csv_store::CsvBookStore;
pub use http_source::HttpBookSource;
pub use memory_store::MemoryBookStore;
