//! The host-owned chat body and message content model.
//!
//! The filter only ever rewrites text. A message's content is either one
//! plain string or an ordered list of typed parts, of which only the
//! `"text"`-typed ones are candidates for substitution. Everything else the
//! host put into the body is carried in flattened maps and serialized back
//! out untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chat request or response body as handed to the hooks by the host.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Body {
    /// The conversation messages, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    /// Any remaining host fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Body {
    /// Returns the most recently added message, if any.
    pub fn last_message_mut(&mut self) -> Option<&mut Message> {
        self.messages
            .as_mut()
            .and_then(|messages| messages.last_mut())
    }
}

/// A single chat message within a [`Body`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Message {
    /// The message content. Absent content is passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Remaining message fields such as the role, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Creates a message holding a single plain-text content string.
    pub fn text(text: impl Into<String>) -> Message {
        Message {
            content: Some(Content::text(text)),
            extra: Map::new(),
        }
    }
}

/// Message content: one plain string, or an ordered list of typed parts.
///
/// Content of any other shape is carried through verbatim and never
/// rewritten.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// The whole content as a single text string.
    Text(String),
    /// The content as a sequence of typed parts.
    Parts(Vec<ContentPart>),
    /// Any other content shape, passed through untouched.
    Other(Value),
}

impl Content {
    /// Creates a plain-text content value.
    pub fn text(text: impl Into<String>) -> Content {
        Content::Text(text.into())
    }

    /// Returns the content as a single text string, when it is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Parts(_) | Content::Other(_) => None,
        }
    }
}

/// One part of a multi-part message content.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ContentPart {
    /// A part carrying a type tag and inline text.
    Text(TextPart),
    /// Any other part shape, such as an image reference, passed through
    /// untouched.
    Other(Value),
}

/// A `{"type": …, "text": …}` content part.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TextPart {
    /// The part's type tag. Substitution applies only when this is
    /// `"text"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The part's text payload.
    pub text: String,
    /// Remaining part fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextPart {
    /// Whether this part's text is subject to command substitution.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == "text"
    }
}
