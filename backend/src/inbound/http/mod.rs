//! HTTP inbound adapter exposing REST endpoints.

pub mod envelope;
pub mod error;
pub mod expenses;
pub mod health;
pub mod interview;
pub mod schemas;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;
