//! A chat-pipeline filter that replaces `/gif "query"` commands with inline
//! GIF markdown sourced from the Giphy search API.
//!
//! The host pipeline calls [`Filter::inlet`] before the chat model runs and
//! [`Filter::outlet`] on the produced response. Only the outbound path
//! rewrites message text, so a user's literal command survives untouched
//! until the model has seen it.

pub mod command;
pub mod config;
mod error;
pub mod event;
mod filter;
pub mod message;
pub mod resolver;

pub use config::{Config, UserValves, Valves};
pub use error::Error;
pub use event::{Event, EventSink, NullSink, Status};
pub use filter::{Filter, UserContext};
pub use message::{Body, Content, ContentPart, Message};
pub use resolver::{Resolver, Selection};
