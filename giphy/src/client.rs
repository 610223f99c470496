//! A client for the Giphy GIF search web API.
//!
//! This module provides a high-level asynchronous interface for issuing
//! search requests against the API and decoding the results into structured
//! data.

use std::time::Duration;

use reqwest::{ClientBuilder, redirect::Policy};
use tracing::debug;

use crate::{Error, types::SearchResponse};

/// The base URL of the API service.
const BASE_URL: &str = "https://api.giphy.com";

/// The relative path of the GIF search endpoint.
const SEARCH_PATH: &str = "/v1/gifs/search";

/// The content rating requested for every search.
const SEARCH_RATING: &str = "g";

/// An asynchronous client for the Giphy search API.
#[derive(Debug)]
pub struct Client {
    /// The base URL of the service endpoint.
    base_url: String,
    /// The API key sent with every request.
    api_key: String,
    /// The underlying [`reqwest::Client`] used for making HTTP requests.
    client: reqwest::Client,
}

impl Client {
    /// Constructs a new `Client` with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built. For a
    /// non-panicking version, see [`Client::try_new`].
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Client {
        Client::try_new(api_key).expect("could not construct http client")
    }

    /// Attempts to construct a new `Client` with default settings.
    ///
    /// The client is configured with gzip support, a 30-second timeout and
    /// redirects disabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BuildClient`] if the underlying HTTP client fails to
    /// build.
    pub fn try_new(api_key: impl Into<String>) -> Result<Client, Error> {
        let client = ClientBuilder::new()
            .gzip(true)
            .redirect(Policy::none())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(Error::BuildClient)?;

        Ok(Client::with_client(client, api_key))
    }

    /// Constructs a new `Client` using a pre-configured [`reqwest::Client`].
    ///
    /// This is useful when an HTTP client is shared between services or
    /// needs custom configuration.
    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Client {
        let base_url = String::from(BASE_URL);

        Client {
            base_url,
            api_key: api_key.into(),
            client,
        }
    }

    /// Searches for GIFs matching `query`, returning at most `limit`
    /// results restricted to the general-audiences content rating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] if the request fails, times out or the
    /// server responds with an error status, and [`Error::ParseResponse`] if
    /// the response body cannot be decoded.
    pub async fn search(&self, query: &str, limit: u32) -> Result<SearchResponse, Error> {
        debug!(%query, limit, "searching for gifs");

        let url = format!("{base_url}{SEARCH_PATH}", base_url = self.base_url);
        let limit = limit.to_string();
        let params = [
            ("api_key", self.api_key.as_str()),
            ("q", query),
            ("limit", &limit),
            ("rating", SEARCH_RATING),
        ];
        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(Error::Request)?;

        match response.error_for_status() {
            Ok(response) => {
                let search: SearchResponse =
                    response.json().await.map_err(Error::ParseResponse)?;
                debug!(num_results = search.data.len(), "fetched search results");

                Ok(search)
            }
            Err(err) => Err(Error::Request(err)),
        }
    }
}
