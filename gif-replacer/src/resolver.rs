//! Query resolution and caching.
//!
//! The resolver turns a search query into a single displayable GIF URL.
//! Each query's candidate list is fetched once per process lifetime and
//! cached; selection then happens against the cached list, either uniformly
//! at random or by rotating through it in order. Every failure mode
//! degrades to a human-readable placeholder string that is substituted into
//! the chat text verbatim, so resolution never fails the pipeline.

use std::collections::{HashMap, VecDeque, hash_map::Entry};

use rand::prelude::IteratorRandom;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Valves;

/// How a GIF is chosen from a query's cached candidate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Pick uniformly at random. The cached list is left untouched.
    Random,
    /// Take the front of the list and rotate it to the back, cycling
    /// through every candidate before any repeats.
    Sequential,
}

/// Resolves search queries to GIF URLs through a per-query result cache.
pub struct Resolver {
    /// The search client, or `None` when no API key is configured.
    client: Option<giphy::Client>,
    /// Upper bound on the number of results fetched per search.
    limit: u32,
    /// Cached candidate URLs per query. A populated entry is never
    /// re-fetched or evicted for the lifetime of the process. The async
    /// mutex is held across the fetch so concurrent callers cannot
    /// interleave rotation with a miss being filled.
    cache: Mutex<HashMap<String, VecDeque<String>>>,
}

impl Resolver {
    /// Creates a resolver for the given valves.
    ///
    /// An empty API key disables lookups; every resolution then returns a
    /// placeholder without touching the network.
    #[must_use]
    pub fn new(valves: &Valves) -> Resolver {
        let client = (!valves.giphy_api_key.is_empty())
            .then(|| giphy::Client::new(valves.giphy_api_key.clone()));

        Resolver {
            client,
            limit: valves.max_gif_results,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves `query` to a GIF URL, or to a placeholder sentence
    /// describing why none is available.
    ///
    /// The first resolution of a query performs one search request and
    /// caches the candidate list; later resolutions are served from the
    /// cache. A failed or empty search is not cached, so the next identical
    /// query retries the request.
    pub async fn resolve(&self, query: &str, selection: Selection) -> String {
        let Some(client) = &self.client else {
            return missing_key(query);
        };

        let mut cache = self.cache.lock().await;
        let urls = match cache.entry(query.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let response = match client.search(query, self.limit).await {
                    Ok(response) => response,
                    Err(err) => {
                        warn!(%query, error = %err, "gif search failed");
                        return search_error(&err);
                    }
                };

                if response.data.is_empty() {
                    debug!(%query, "search returned no results");
                    return no_gif_found(query);
                }

                let urls: VecDeque<String> =
                    response.fixed_width_urls().map(String::from).collect();

                entry.insert(urls)
            }
        };

        match selection {
            Selection::Random => {
                let mut rng = rand::rng();

                urls.iter()
                    .choose(&mut rng)
                    .cloned()
                    .unwrap_or_else(|| no_gif_found(query))
            }
            Selection::Sequential => match urls.pop_front() {
                Some(url) => {
                    urls.push_back(url.clone());
                    url
                }
                None => no_gif_found(query),
            },
        }
    }
}

#[cfg(test)]
impl Resolver {
    /// Pre-populates the cached candidate list for `query`.
    pub(crate) async fn prime(&self, query: &str, urls: &[&str]) {
        let urls = urls.iter().map(|url| (*url).to_string()).collect();

        self.cache.lock().await.insert(query.to_string(), urls);
    }

    /// Returns a copy of the cached candidate list for `query`.
    pub(crate) async fn cached(&self, query: &str) -> Option<Vec<String>> {
        self.cache
            .lock()
            .await
            .get(query)
            .map(|urls| urls.iter().cloned().collect())
    }
}

/// Placeholder substituted when no API key is configured.
fn missing_key(query: &str) -> String {
    format!("Error: Giphy API key missing for query: {query}")
}

/// Placeholder substituted when a search produced no usable GIF.
fn no_gif_found(query: &str) -> String {
    format!("No GIF found for: {query}")
}

/// Placeholder substituted when the search request itself failed.
fn search_error(err: &giphy::Error) -> String {
    format!("GIF search error: {err}")
}
