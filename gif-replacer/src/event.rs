//! Host status events.
//!
//! The host may hand the outlet an event channel. When debug mode is on,
//! the filter publishes a single completion status after processing a
//! response. The channel is modeled as a one-method capability trait so a
//! real host channel and a recording test stub satisfy it equally.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Error;

/// An event published to the host over the status channel.
///
/// Serializes to the host's wire shape, for example
/// `{"type": "status", "data": {"description": "…", "done": true}}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Event {
    /// A progress update for the chat turn being processed.
    Status(Status),
}

/// The payload of a status event.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Status {
    /// Human-readable description of what happened.
    pub description: String,
    /// Whether processing of the turn has completed.
    pub done: bool,
}

impl Status {
    /// Creates a completed status with the given description.
    pub fn done(description: impl Into<String>) -> Status {
        Status {
            description: description.into(),
            done: true,
        }
    }
}

/// The capability of delivering events back to the host.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publishes a single event to the host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Event`] when the host rejected or dropped the
    /// event.
    async fn publish(&self, event: Event) -> Result<(), Error>;
}

/// An [`EventSink`] that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn publish(&self, _event: Event) -> Result<(), Error> {
        Ok(())
    }
}

#[async_trait]
impl EventSink for tokio::sync::mpsc::Sender<Event> {
    async fn publish(&self, event: Event) -> Result<(), Error> {
        self.send(event)
            .await
            .map_err(|err| Error::Event(Box::new(err)))
    }
}
