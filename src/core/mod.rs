pub mod auth;
pub mod discount;
pub mod service;

pub use crate::domain::model::{Book, Decision, ReadRequest, ReadResult};
pub use crate::domain::ports::{AfterRead, Authorizer, BookStore};
pub use crate::utils::error::Result;
pub use auth::{AllowAll, RolePolicy};
