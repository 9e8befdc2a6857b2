//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a usable response (connection failure,
    /// timeout, or a transport-level error while reading the body).
    #[error("request failed: {0}")]
    Network(String),
    /// The API returned a non-success status with a body snippet.
    #[error("request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The API answered 2xx with an empty body.
    #[error("empty response body")]
    EmptyResponse,
    /// The endpoint path was empty after trimming slashes.
    #[error("invalid endpoint path: {0:?}")]
    InvalidEndpoint(String),
}
