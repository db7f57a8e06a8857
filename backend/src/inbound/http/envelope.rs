//! Uniform success envelope for every endpoint.

use serde::Serialize;

/// `{status: "success", message, data}` wrapper returned by successful
/// mutations and queries.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    status: &'static str,
    message: String,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data,
        }
    }
}
