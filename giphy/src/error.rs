use thiserror::Error;

/// Errors that can occur when talking to the search API.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying HTTP client could not be constructed.
    #[error("could not construct http client: {0}")]
    BuildClient(#[source] reqwest::Error),
    /// The request failed, timed out or returned an error status.
    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),
    /// The response body could not be decoded as a search response.
    #[error("unable to parse search response: {0}")]
    ParseResponse(#[source] reqwest::Error),
}
