//! HTTP client for the content store and tracked-account store.
//!
//! Wraps `reqwest` with typed envelope deserialization and the sequential
//! page-drain loop used everywhere a listing must be read in full. Pages are
//! requested by number (`page=1,2,3,…`); the envelope's `next` field only
//! signals whether another page exists.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::types::{Page, Post, ReportRecord, TrackedAccount};

const ACCOUNTS_PATH: &str = "track-accounts/accounts/";
const REPORTS_PATH: &str = "track-accounts/reports/";

/// Client for the collection backend's REST API.
///
/// Manages the HTTP client, base URL, and optional auth token. Use
/// [`StoreClient::new`] for production or [`StoreClient::with_base_url`] to
/// point at a mock server in tests.
pub struct StoreClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl StoreClient {
    /// Creates a new client for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` is not
    /// a valid URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        api_token: Option<&str>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends listing paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_token: api_token.map(str::to_owned),
        })
    }

    /// Creates a client with a custom base URL and default timeout/agent
    /// (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::new`].
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Self::new(base_url, 30, "trackscope/0.1 (test)", None)
    }

    /// Fetches one page of tracked accounts.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ApiError::Http`] — network or TLS failure.
    /// - [`ApiError::Deserialize`] — body does not match the envelope shape.
    pub async fn fetch_accounts_page(
        &self,
        page: usize,
        page_size: u32,
    ) -> Result<Page<TrackedAccount>, ApiError> {
        let url = self.build_url(
            ACCOUNTS_PATH,
            &[
                ("page", &page.to_string()),
                ("page_size", &page_size.to_string()),
            ],
        )?;
        self.get_page(url, "tracked accounts").await
    }

    /// Drains the tracked-account listing into a single vector.
    ///
    /// Fetches pages sequentially until the envelope reports no next page or
    /// `max_pages` is reached. Hitting the ceiling is not an error — the
    /// listing is truncated with a warning, trading completeness for a
    /// termination guarantee.
    ///
    /// # Errors
    ///
    /// Any page-level error aborts the whole drain; no partial result is
    /// returned.
    pub async fn fetch_all_accounts(
        &self,
        page_size: u32,
        max_pages: usize,
    ) -> Result<Vec<TrackedAccount>, ApiError> {
        let mut all: Vec<TrackedAccount> = Vec::new();
        let mut page = 1usize;
        loop {
            if page > max_pages {
                tracing::warn!(
                    path = ACCOUNTS_PATH,
                    max_pages,
                    collected = all.len(),
                    "page ceiling reached; truncating listing"
                );
                break;
            }
            let envelope = self.fetch_accounts_page(page, page_size).await?;
            tracing::debug!(path = ACCOUNTS_PATH, page, fetched = envelope.results.len());
            all.extend(envelope.results);
            if envelope.next.is_none() {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    /// Fetches one page of posts from a platform listing path
    /// (e.g. `"instagram/posts/"`), filtered by folder and date range.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::fetch_accounts_page`].
    pub async fn fetch_posts_page(
        &self,
        listing_path: &str,
        folder_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        page: usize,
        page_size: u32,
    ) -> Result<Page<Post>, ApiError> {
        let url = self.build_url(
            listing_path,
            &[
                ("folder_id", &folder_id.to_string()),
                ("start_date", &start_date.to_string()),
                ("end_date", &end_date.to_string()),
                ("page", &page.to_string()),
                ("page_size", &page_size.to_string()),
            ],
        )?;
        self.get_page(url, listing_path).await
    }

    /// Drains a folder's post listing for the date range into a single vector.
    ///
    /// Same pagination and ceiling semantics as
    /// [`StoreClient::fetch_all_accounts`].
    ///
    /// # Errors
    ///
    /// Any page-level error aborts the whole drain; no partial result is
    /// returned.
    pub async fn fetch_all_posts(
        &self,
        listing_path: &str,
        folder_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        page_size: u32,
        max_pages: usize,
    ) -> Result<Vec<Post>, ApiError> {
        let mut all: Vec<Post> = Vec::new();
        let mut page = 1usize;
        loop {
            if page > max_pages {
                tracing::warn!(
                    path = listing_path,
                    folder_id,
                    max_pages,
                    collected = all.len(),
                    "page ceiling reached; truncating listing"
                );
                break;
            }
            let envelope = self
                .fetch_posts_page(listing_path, folder_id, start_date, end_date, page, page_size)
                .await?;
            tracing::debug!(
                path = listing_path,
                folder_id,
                page,
                fetched = envelope.results.len()
            );
            all.extend(envelope.results);
            if envelope.next.is_none() {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    /// Persists a report record (`POST track-accounts/reports/`).
    ///
    /// Any 2xx status is success. Callers treat this endpoint as a
    /// best-effort audit trail and decide for themselves whether failure is
    /// fatal.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ApiError::Http`] — network or TLS failure.
    pub async fn save_report(&self, record: &ReportRecord) -> Result<(), ApiError> {
        let url = self.build_url(REPORTS_PATH, &[])?;
        let mut request = self.client.post(url.clone()).json(record);
        if let Some(token) = &self.api_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }

    /// GETs `url` and deserializes the paginated envelope, tagging
    /// deserialization failures with `context` for error messages.
    async fn get_page<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<Page<T>, ApiError> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.api_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Page<T>>(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Joins `path` onto the base URL and appends query parameters.
    fn build_url(&self, path: &str, params: &[(&str, &String)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
