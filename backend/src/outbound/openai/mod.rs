//! Outbound adapter for the remote text-generation model.

mod dto;
pub mod http_source;

pub use http_source::{OpenAiHttpModel, OpenAiModelBuildError};
