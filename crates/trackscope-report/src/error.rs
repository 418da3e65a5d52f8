use thiserror::Error;
use trackscope_core::{ContentCategory, Platform};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("no {category} listing exists for {platform}")]
    UnsupportedListing {
        platform: Platform,
        category: ContentCategory,
    },

    #[error(transparent)]
    Api(#[from] trackscope_api::ApiError),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Io(#[from] std::io::Error),
}
