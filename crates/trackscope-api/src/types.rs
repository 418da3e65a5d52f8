//! Content-store and tracked-account-store API response types.
//!
//! All listing endpoints wrap results in the same paginated envelope;
//! [`Page`] captures that pattern generically. The backend serves scraped
//! data of loosely-enforced shape, so every non-identifying field is
//! defaulted rather than trusted to be present — a missing field degrades
//! to empty/`None` instead of failing the whole page.

use serde::{Deserialize, Serialize};
use trackscope_core::Platform;

/// Paginated envelope for all listing endpoints:
/// `{ "results": [...], "count": N, "next": <url or null> }`.
///
/// `next` is an opaque URL; the client only tests it for `null` to decide
/// whether another page exists (pages are requested by number, not cursor).
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub next: Option<String>,
}

/// A single scraped content item (post, reel, or comment).
///
/// Comment listings name their engagement fields `likes_number` and
/// `replies_number`; the aliases fold both shapes into one type.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub url: String,
    /// ISO-8601 date or datetime, passed through verbatim into reports.
    #[serde(default)]
    pub date_posted: String,
    #[serde(default, alias = "likes_number")]
    pub likes: Option<i64>,
    #[serde(default, alias = "replies_number")]
    pub num_comments: Option<i64>,
    #[serde(default)]
    pub hashtags: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-text label such as `"IG Post"`. Often absent; see
    /// [`Post::platform_label`] for the derived fallback.
    #[serde(default)]
    pub platform_type: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Seed metadata captured at scrape time: either a raw profile URL or a
    /// JSON-encoded object with a `url` field. Sole source for recovering
    /// the target account's username.
    #[serde(default)]
    pub discovery_input: String,
}

impl Post {
    /// The display platform type: `platform_type` verbatim when present,
    /// otherwise derived from `content_type` (e.g. `"post"` → `"IG Post"`),
    /// otherwise empty.
    #[must_use]
    pub fn platform_label(&self, platform: Platform) -> String {
        if let Some(label) = self.platform_type.as_deref().filter(|s| !s.is_empty()) {
            return label.to_owned();
        }
        match self.content_type.as_deref().filter(|s| !s.is_empty()) {
            Some(content_type) => {
                format!("{} {}", platform.label_prefix(), capitalize(content_type))
            }
            None => String::new(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// A monitored real-world subject with known social-media profile links.
///
/// Each link field holds either a bare username or a full profile URL;
/// matching only ever targets one platform's field at a time.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackedAccount {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iac_no: String,
    #[serde(default)]
    pub instagram_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub linkedin_link: Option<String>,
    #[serde(default)]
    pub tiktok_link: Option<String>,
    #[serde(default)]
    pub close_monitoring: bool,
}

impl TrackedAccount {
    /// The link field for `platform`, with empty strings treated as absent.
    #[must_use]
    pub fn platform_link(&self, platform: Platform) -> Option<&str> {
        let link = match platform {
            Platform::Instagram => self.instagram_link.as_deref(),
            Platform::Facebook => self.facebook_link.as_deref(),
            Platform::Linkedin => self.linkedin_link.as_deref(),
            Platform::Tiktok => self.tiktok_link.as_deref(),
        };
        link.filter(|s| !s.trim().is_empty())
    }
}

/// Body for the report-persistence endpoint (`POST track-accounts/reports/`).
///
/// `source_folders` is a JSON-stringified array of folder ids — a string
/// field on the wire, matching what the backend stores.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub source_folders: String,
}
