//! Shared Data Transfer Objects for the NASA feeds.
//!
//! These types model the wire formats of the two upstream APIs: the APOD
//! (Astronomy Picture of the Day) endpoint and the NASA Image and Video
//! Library search endpoint. They are used both by the upstream client and by
//! the proxy handlers, so the proxy re-emits the same normalized shape it
//! parsed.

use serde::{Deserialize, Serialize};

// =============================================================================
// APOD
// =============================================================================

/// Media kind reported by the APOD feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// A single Astronomy Picture of the Day record.
///
/// `date`, `title`, `url`, and `media_type` are required on the wire; a
/// payload missing any of them is rejected as malformed by the upstream
/// client. Everything else is optional and passed through when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apod {
    /// Date of the picture, `YYYY-MM-DD`
    pub date: String,
    /// Display title
    pub title: String,
    /// Explanation text (absent in some historical records)
    #[serde(default)]
    pub explanation: String,
    /// Main media URL (image or embedded video)
    pub url: String,
    /// Whether `url` points at an image or a video
    pub media_type: MediaType,
    /// Optional HD image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    /// Optional API service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
    /// Optional copyright attribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Optional video thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// APOD responses are a single record for a `date` request and an array for a
/// `count` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApodResult {
    One(Box<Apod>),
    Many(Vec<Apod>),
}

// =============================================================================
// Image and Video Library
// =============================================================================

/// Metadata for a single image record.
///
/// `nasa_id` is the provider's stable identifier. It is occasionally absent,
/// in which case consumers derive a stable key from the record's position
/// (see [`ImageItem::stable_key`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Long-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp as reported by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    /// Provider-assigned identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nasa_id: Option<String>,
}

/// Link entry for an image record, usually a thumbnail or preview URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageLink {
    /// Direct URL to the image or thumbnail
    pub href: String,
    /// Relation, e.g. "preview"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    /// Render hint, e.g. "image"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<String>,
}

/// One item in the image search collection: metadata entries plus links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageItem {
    #[serde(default)]
    pub data: Vec<ImageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<ImageLink>>,
}

impl ImageItem {
    /// Display title, falling back to a placeholder when the provider omits it.
    pub fn title(&self) -> &str {
        self.data
            .first()
            .and_then(|d| d.title.as_deref())
            .unwrap_or("Untitled image")
    }

    /// First link URL, typically the thumbnail.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.first())
            .map(|link| link.href.as_str())
    }

    /// Stable identity for this item.
    ///
    /// Uses the provider's `nasa_id` when present; otherwise derives a key
    /// from the page number and the item's index within it, so the same item
    /// always yields the same key across renders.
    pub fn stable_key(&self, page: u32, index: usize) -> String {
        match self.data.first().and_then(|d| d.nasa_id.as_deref()) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("page{page}-item{index}"),
        }
    }
}

/// Collection metadata returned alongside search items.
///
/// `total_hits` is kept as a raw JSON value: the provider occasionally sends
/// non-numeric garbage here, and a malformed count should degrade to
/// "unknown" rather than fail the whole page parse. Use
/// [`CollectionMetadata::numeric_total_hits`] to read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hits: Option<serde_json::Value>,
}

impl CollectionMetadata {
    /// The total hit count, when the provider sent a usable number.
    pub fn numeric_total_hits(&self) -> Option<u64> {
        self.total_hits.as_ref().and_then(|v| v.as_u64())
    }
}

/// The `collection` object of an image search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCollection {
    #[serde(default)]
    pub items: Vec<ImageItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CollectionMetadata>,
}

/// Full image search response: `{ collection: { items, metadata } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSearchResult {
    pub collection: ImageCollection,
}

impl ImageSearchResult {
    /// Total hits reported by the provider, when present and numeric.
    pub fn total_hits(&self) -> Option<u64> {
        self.collection
            .metadata
            .as_ref()
            .and_then(|m| m.numeric_total_hits())
    }
}
