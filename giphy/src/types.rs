//! Structured types for the search API's JSON responses.
//!
//! Every field is lenient: missing or null members fall back to their
//! defaults so partial and error-shaped documents still deserialize.

use serde::Deserialize;

/// A response to a GIF search request.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// The GIFs matching the query, in relevance order.
    #[serde(default)]
    pub data: Vec<Gif>,
    /// Paging information for the returned result window.
    #[serde(default)]
    pub pagination: Option<Pagination>,
    /// Request metadata echoed back by the API.
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl SearchResponse {
    /// Returns the fixed-width rendition URL of every result that has one,
    /// in response order. Results without a usable rendition are skipped.
    pub fn fixed_width_urls(&self) -> impl Iterator<Item = &str> {
        self.data.iter().filter_map(Gif::fixed_width_url)
    }
}

/// A single GIF in a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct Gif {
    /// The GIF's unique identifier.
    #[serde(default)]
    pub id: String,
    /// The title shown for the GIF.
    #[serde(default)]
    pub title: String,
    /// The renditions available for the GIF.
    #[serde(default)]
    pub images: Images,
}

impl Gif {
    /// Returns the URL of the fixed-width rendition, if present and
    /// non-empty.
    #[must_use]
    pub fn fixed_width_url(&self) -> Option<&str> {
        self.images
            .fixed_width
            .as_ref()
            .and_then(|rendition| rendition.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// The set of renditions the API exposes for a GIF.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Images {
    /// The 200 pixel wide rendition used for inline display.
    #[serde(default)]
    pub fixed_width: Option<Rendition>,
}

/// A concrete rendition of a GIF.
#[derive(Debug, Clone, Deserialize)]
pub struct Rendition {
    /// Direct URL of the rendition's media file.
    #[serde(default)]
    pub url: Option<String>,
    /// Width in pixels, reported as a string by the API.
    #[serde(default)]
    pub width: Option<String>,
    /// Height in pixels, reported as a string by the API.
    #[serde(default)]
    pub height: Option<String>,
}

/// Paging details for a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    /// Total number of GIFs available for the query.
    #[serde(default)]
    pub total_count: u64,
    /// Number of GIFs returned in this response.
    #[serde(default)]
    pub count: u64,
    /// Position of this window within the full result list.
    #[serde(default)]
    pub offset: u64,
}

/// Request metadata attached to every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    /// HTTP status mirrored into the body.
    #[serde(default)]
    pub status: u16,
    /// Human-readable status message.
    #[serde(default)]
    pub msg: String,
    /// Unique identifier for the API response.
    #[serde(default)]
    pub response_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_FIXTURE: &str = r##"{
      "data": [
        {
          "type": "gif",
          "id": "feqkVgjJpYtjy",
          "title": "Happy Cat GIF",
          "images": {
            "original": {
              "url": "https://media.giphy.com/media/feqkVgjJpYtjy/giphy.gif",
              "width": "500",
              "height": "375"
            },
            "fixed_width": {
              "url": "https://media.giphy.com/media/feqkVgjJpYtjy/200w.gif",
              "width": "200",
              "height": "150"
            }
          }
        },
        {
          "type": "gif",
          "id": "missing",
          "title": "No Renditions",
          "images": {}
        },
        {
          "type": "gif",
          "id": "empty",
          "title": "Empty Url",
          "images": { "fixed_width": { "url": "" } }
        },
        {
          "type": "gif",
          "id": "7rj2ZgttvgomY",
          "title": "Dancing Dog GIF",
          "images": {
            "fixed_width": {
              "url": "https://media.giphy.com/media/7rj2ZgttvgomY/200w.gif"
            }
          }
        }
      ],
      "pagination": { "total_count": 4321, "count": 4, "offset": 0 },
      "meta": { "status": 200, "msg": "OK", "response_id": "5cv8nq4fjqbtdm3x0y" }
    }"##;

    #[test]
    fn test_deserialize_search_response() {
        let response: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();

        assert_eq!(response.data.len(), 4);
        assert_eq!(response.data[0].id, "feqkVgjJpYtjy");
        assert_eq!(response.data[0].title, "Happy Cat GIF");

        let pagination = response.pagination.unwrap();
        assert_eq!(pagination.total_count, 4321);
        assert_eq!(pagination.count, 4);

        let meta = response.meta.unwrap();
        assert_eq!(meta.status, 200);
        assert_eq!(meta.msg, "OK");
    }

    #[test]
    fn test_fixed_width_urls_skips_unusable_renditions() {
        let response: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let urls: Vec<_> = response.fixed_width_urls().collect();

        assert_eq!(
            urls,
            vec![
                "https://media.giphy.com/media/feqkVgjJpYtjy/200w.gif",
                "https://media.giphy.com/media/7rj2ZgttvgomY/200w.gif",
            ]
        );
    }

    #[test]
    fn test_deserialize_error_shaped_response() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"meta": {"status": 401, "msg": "Unauthorized"}}"#).unwrap();

        assert!(response.data.is_empty());
        assert!(response.pagination.is_none());
        assert_eq!(response.meta.unwrap().status, 401);
    }
}
