//! An asynchronous client for the Giphy GIF search API.
//!
//! This crate provides a thin, typed interface to the `/v1/gifs/search`
//! endpoint. Responses are decoded into structured types that expose the
//! fixed-width renditions used for inline display.

pub mod client;
mod error;
pub mod types;

pub use client::Client;
pub use error::Error;
pub use types::SearchResponse;
