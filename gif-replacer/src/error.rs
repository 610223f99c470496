//! Error types

use std::error::Error as StdError;

use thiserror::Error;

/// Errors surfaced by the filter's host-facing API.
///
/// GIF resolution itself never returns an error; its failure modes degrade
/// to placeholder text substituted into the chat message instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A status event could not be delivered to the host.
    #[error("event error: {0}")]
    Event(Box<dyn StdError + Send + Sync>),
    /// The configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(#[from] figment::Error),
}
