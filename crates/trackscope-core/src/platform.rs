//! Platform capability table.
//!
//! Each supported social-media platform knows its profile-URL shape, which
//! content categories the collection backend exposes for it, and the API path
//! segment its listings live under. Callers resolve endpoints through
//! [`Platform::endpoint_path`] rather than hand-assembling URLs.

use serde::{Deserialize, Serialize};

/// A social-media platform the collection backend scrapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Linkedin,
    Tiktok,
}

/// A category of collected content, scoped per folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Posts,
    Reels,
    Comments,
    Profiles,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::Linkedin,
        Platform::Tiktok,
    ];

    /// Domain substring used to recognise profile URLs for this platform.
    #[must_use]
    pub fn domain(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram.com",
            Platform::Facebook => "facebook.com",
            Platform::Linkedin => "linkedin.com",
            Platform::Tiktok => "tiktok.com",
        }
    }

    /// Regex source capturing the username segment of a profile URL.
    ///
    /// The first capture group is the username. Scheme and `www.` are
    /// optional; the capture stops at the next path separator or query.
    #[must_use]
    pub fn username_pattern(self) -> &'static str {
        match self {
            Platform::Instagram => r"(?:https?://)?(?:www\.)?instagram\.com/([^/?]+)",
            Platform::Facebook => r"(?:https?://)?(?:www\.)?facebook\.com/([^/?]+)",
            Platform::Linkedin => r"(?:https?://)?(?:www\.)?linkedin\.com/(?:in/|company/)?([^/?]+)",
            Platform::Tiktok => r"(?:https?://)?(?:www\.)?tiktok\.com/@?([^/?]+)",
        }
    }

    /// Short label used when deriving a display platform type, e.g. `"IG Post"`.
    #[must_use]
    pub fn label_prefix(self) -> &'static str {
        match self {
            Platform::Instagram => "IG",
            Platform::Facebook => "FB",
            Platform::Linkedin => "LinkedIn",
            Platform::Tiktok => "TikTok",
        }
    }

    /// API path segment for this platform's listings.
    #[must_use]
    pub fn api_segment(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
            Platform::Tiktok => "tiktok",
        }
    }

    /// Whether the collection backend exposes `category` for this platform.
    ///
    /// Instagram carries every category; Facebook lacks profile scraping;
    /// LinkedIn and TikTok only expose post listings.
    #[must_use]
    pub fn supports(self, category: ContentCategory) -> bool {
        match self {
            Platform::Instagram => true,
            Platform::Facebook => !matches!(category, ContentCategory::Profiles),
            Platform::Linkedin | Platform::Tiktok => {
                matches!(category, ContentCategory::Posts)
            }
        }
    }

    /// Relative listing path for `category` on this platform, e.g.
    /// `"instagram/posts/"`. `None` when the combination is unsupported.
    #[must_use]
    pub fn endpoint_path(self, category: ContentCategory) -> Option<String> {
        if self.supports(category) {
            Some(format!("{}/{}/", self.api_segment(), category.api_segment()))
        } else {
            None
        }
    }
}

impl ContentCategory {
    #[must_use]
    pub fn api_segment(self) -> &'static str {
        match self {
            ContentCategory::Posts => "posts",
            ContentCategory::Reels => "reels",
            ContentCategory::Comments => "comments",
            ContentCategory::Profiles => "profiles",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_segment())
    }
}

impl std::fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_segment())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instagram" | "ig" => Ok(Platform::Instagram),
            "facebook" | "fb" => Ok(Platform::Facebook),
            "linkedin" => Ok(Platform::Linkedin),
            "tiktok" => Ok(Platform::Tiktok),
            other => Err(format!(
                "unknown platform '{other}' (expected instagram, facebook, linkedin, or tiktok)"
            )),
        }
    }
}

impl std::str::FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posts" => Ok(ContentCategory::Posts),
            "reels" => Ok(ContentCategory::Reels),
            "comments" => Ok(ContentCategory::Comments),
            "profiles" => Ok(ContentCategory::Profiles),
            other => Err(format!(
                "unknown content category '{other}' (expected posts, reels, comments, or profiles)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_path_for_supported_combination() {
        assert_eq!(
            Platform::Instagram.endpoint_path(ContentCategory::Posts),
            Some("instagram/posts/".to_string())
        );
        assert_eq!(
            Platform::Facebook.endpoint_path(ContentCategory::Reels),
            Some("facebook/reels/".to_string())
        );
    }

    #[test]
    fn endpoint_path_for_unsupported_combination_is_none() {
        assert!(Platform::Tiktok
            .endpoint_path(ContentCategory::Comments)
            .is_none());
        assert!(Platform::Facebook
            .endpoint_path(ContentCategory::Profiles)
            .is_none());
        assert!(Platform::Linkedin
            .endpoint_path(ContentCategory::Reels)
            .is_none());
    }

    #[test]
    fn every_platform_supports_posts() {
        for platform in Platform::ALL {
            assert!(platform.supports(ContentCategory::Posts), "{platform}");
        }
    }

    #[test]
    fn platform_parses_from_short_names() {
        assert_eq!("ig".parse::<Platform>().unwrap(), Platform::Instagram);
        assert_eq!("FB".parse::<Platform>().unwrap(), Platform::Facebook);
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn username_pattern_compiles_for_all_platforms() {
        for platform in Platform::ALL {
            assert!(regex::Regex::new(platform.username_pattern()).is_ok());
        }
    }
}
