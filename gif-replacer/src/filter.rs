//! The message-transform hooks.
//!
//! [`Filter`] is the unit the host registers: a synchronous inlet invoked
//! before the chat model runs and an asynchronous outlet invoked on the
//! produced response. Substitution happens only in the outlet, so a user's
//! literal command text is never rewritten before the model sees it.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::command::{self, Extractor};
use crate::config::{UserValves, Valves};
use crate::event::{Event, EventSink, Status};
use crate::message::{Body, Content, ContentPart};
use crate::resolver::{Resolver, Selection};

/// Description carried by the status event published after processing.
const STATUS_PROCESSED: &str = "GIF Filter: Commands processed";

/// Host-supplied information about the user a hook invocation belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserContext {
    /// The host's unique identifier for the user.
    pub id: String,
    /// Inline per-user valve overrides, when the host supplies them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valves: Option<UserValves>,
}

impl UserContext {
    /// Creates a context for the given user id with no inline valves.
    pub fn new(id: impl Into<String>) -> UserContext {
        UserContext {
            id: id.into(),
            valves: None,
        }
    }

    /// Attaches inline valves to the context.
    #[must_use]
    pub fn with_valves(mut self, valves: UserValves) -> UserContext {
        self.valves = Some(valves);
        self
    }
}

/// The GIF replacement filter.
///
/// One instance is constructed per host registration and shared across
/// invocations and users.
pub struct Filter {
    /// Process-wide valves, fixed at construction.
    valves: Valves,
    /// The command extractor.
    extractor: Extractor,
    /// The caching query resolver.
    resolver: Resolver,
    /// Per-user valve records, keyed by the host's user id and populated
    /// from the contexts the host passes in.
    user_valves: RwLock<HashMap<String, UserValves>>,
}

impl Filter {
    /// Creates a filter with the given valves.
    #[must_use]
    pub fn new(valves: Valves) -> Filter {
        let resolver = Resolver::new(&valves);

        Filter {
            resolver,
            extractor: Extractor::new(),
            user_valves: RwLock::new(HashMap::new()),
            valves,
        }
    }

    /// Creates a filter with default valves, taking the API key from the
    /// `GIPHY_API_KEY` environment variable.
    #[must_use]
    pub fn from_env() -> Filter {
        Filter::new(Valves::from_env())
    }

    /// Returns the process-wide valves.
    ///
    /// The host reads `priority` from here when ordering its filters.
    #[must_use]
    pub fn valves(&self) -> &Valves {
        &self.valves
    }

    /// Stores a per-user valve record, as a host settings surface would.
    pub fn set_user_valves(&self, user_id: impl Into<String>, valves: UserValves) {
        self.user_valves
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.into(), valves);
    }

    /// Returns the stored valve record for a user, if any.
    #[must_use]
    pub fn user_valves_for(&self, user_id: &str) -> Option<UserValves> {
        self.user_valves
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }

    /// Returns the effective valves for an invocation: inline context
    /// valves win and are recorded for later invocations, then the stored
    /// record for the user, then the defaults.
    fn effective_user_valves(&self, user: Option<&UserContext>) -> UserValves {
        let Some(user) = user else {
            return UserValves::default();
        };

        match &user.valves {
            Some(valves) => {
                self.set_user_valves(&user.id, valves.clone());

                valves.clone()
            }
            None => self.user_valves_for(&user.id).unwrap_or_default(),
        }
    }

    /// Pre-processing hook, invoked before the chat model runs.
    ///
    /// Passes the body through unmodified whether or not replacement is
    /// enabled: substitution is deliberately deferred to the outlet.
    pub fn inlet(&self, body: Body, user: Option<&UserContext>) -> Body {
        if !self.effective_user_valves(user).enable_gif_replace {
            return body;
        }

        body
    }

    /// Post-processing hook, invoked on the chat response.
    ///
    /// Extracts every `/gif "query"` command from the most recent message,
    /// resolves each one to a URL or placeholder and substitutes inline
    /// image markdown. With `debug_mode` set and a sink supplied, a single
    /// completion status event is published afterwards.
    pub async fn outlet(
        &self,
        mut body: Body,
        user: Option<&UserContext>,
        sink: Option<&dyn EventSink>,
    ) -> Body {
        let user_valves = self.effective_user_valves(user);
        if !user_valves.enable_gif_replace {
            return body;
        }

        let selection = user_valves.selection();

        let Some(message) = body.last_message_mut() else {
            return body;
        };

        match &mut message.content {
            Some(Content::Text(text)) => {
                *text = self
                    .replace_commands(std::mem::take(text), selection)
                    .await;
            }
            Some(Content::Parts(parts)) => {
                for part in parts.iter_mut() {
                    if let ContentPart::Text(part) = part
                        && part.is_text()
                    {
                        part.text = self
                            .replace_commands(std::mem::take(&mut part.text), selection)
                            .await;
                    }
                }
            }
            Some(Content::Other(_)) | None => {}
        }

        if self.valves.debug_mode
            && let Some(sink) = sink
        {
            let event = Event::Status(Status::done(STATUS_PROCESSED));

            if let Err(err) = sink.publish(event).await {
                warn!(error = %err, "could not deliver status event");
            }
        }

        body
    }

    /// Replaces each extracted command occurrence in `text` with the inline
    /// image markdown for its resolved URL.
    ///
    /// Commands are processed in extraction order, duplicates included, and
    /// each replaces the leftmost remaining occurrence of its canonical
    /// text. Repeated commands therefore resolve independently and may show
    /// different GIFs under sequential rotation.
    async fn replace_commands(&self, text: String, selection: Selection) -> String {
        let queries = self.extractor.extract(&text);
        if queries.is_empty() {
            return text;
        }

        debug!(num_commands = queries.len(), "replacing gif commands");

        let mut text = text;
        for query in queries {
            let url = self.resolver.resolve(&query, selection).await;
            let markup = format!("![GIF]({url})");

            text = text.replacen(&command::command_text(&query), &markup, 1);
        }

        text
    }
}
