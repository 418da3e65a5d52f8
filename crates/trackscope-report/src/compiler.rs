//! Report generation: fetch everything, match every post, emit CSV.
//!
//! The compiler validates its inputs before any network traffic, writes a
//! best-effort audit record, drains the tracked-account listing and every
//! selected folder's post listing, and only then runs matching — statistics
//! require a complete pass over the fetched set.

use chrono::{NaiveDate, Utc};
use trackscope_api::{Post, ReportRecord, StoreClient, TrackedAccount};
use trackscope_core::{AppConfig, ContentCategory, Platform};

use crate::error::ReportError;
use crate::extract::extract_username;
use crate::matcher::match_account;
use crate::rows::{write_csv, ReportRow};

/// A selected content folder: the platform and category it is scoped to,
/// plus its id on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFolder {
    pub id: i64,
    pub platform: Platform,
    pub category: ContentCategory,
}

impl ReportFolder {
    /// Resolves the backend listing path for this folder.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UnsupportedListing`] when the backend has no
    /// such listing for the platform (e.g. TikTok comments).
    pub fn listing_path(&self) -> Result<String, ReportError> {
        self.platform
            .endpoint_path(self.category)
            .ok_or(ReportError::UnsupportedListing {
                platform: self.platform,
                category: self.category,
            })
    }
}

impl std::str::FromStr for ReportFolder {
    type Err = String;

    /// Parses `platform:id` or `platform:category:id`, e.g. `instagram:12`
    /// or `facebook:reels:7`. The category defaults to `posts`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let (platform_raw, category_raw, id_raw) = match parts.as_slice() {
            [platform, id] => (*platform, "posts", *id),
            [platform, category, id] => (*platform, *category, *id),
            _ => {
                return Err(format!(
                    "invalid folder spec '{s}' (expected platform:id or platform:category:id)"
                ))
            }
        };

        let platform: Platform = platform_raw.parse()?;
        let category: ContentCategory = category_raw.parse()?;
        let id: i64 = id_raw
            .parse()
            .map_err(|_| format!("invalid folder id '{id_raw}' in '{s}'"))?;

        Ok(Self {
            id,
            platform,
            category,
        })
    }
}

/// Match counters over one pass of fetched posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
}

impl MatchStats {
    /// Match rate as a whole percent. Zero when nothing was fetched.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.matched as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// A fully compiled report: CSV text, its suggested filename, and the
/// match statistics for the run.
#[derive(Debug, Clone)]
pub struct CompiledReport {
    pub csv: String,
    pub file_name: String,
    pub stats: MatchStats,
}

/// Orchestrates fetch, match, and CSV assembly against one backend.
pub struct ReportCompiler {
    client: StoreClient,
    page_size: u32,
    max_pages: usize,
    preview_page_size: u32,
}

impl ReportCompiler {
    #[must_use]
    pub fn new(
        client: StoreClient,
        page_size: u32,
        max_pages: usize,
        preview_page_size: u32,
    ) -> Self {
        Self {
            client,
            page_size,
            max_pages,
            preview_page_size,
        }
    }

    /// Builds the client from configuration and wires up paging limits.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Api`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ReportError> {
        let client = StoreClient::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.api_token.as_deref(),
        )?;
        Ok(Self::new(
            client,
            config.page_size,
            config.max_pages,
            config.preview_page_size,
        ))
    }

    /// Generates the full report for the selected folders and date range.
    ///
    /// The audit record is persisted best-effort before any read traffic;
    /// its failure is logged and swallowed since the CSV is the primary
    /// deliverable. Any fetch failure aborts the whole run — no partial
    /// CSV is ever produced.
    ///
    /// The output has exactly one CSV line per fetched post plus the header,
    /// regardless of match outcomes.
    ///
    /// # Errors
    ///
    /// - [`ReportError::Validation`] / [`ReportError::UnsupportedListing`] —
    ///   rejected before any network call.
    /// - [`ReportError::Api`] — any listing fetch failed.
    /// - [`ReportError::Csv`] / [`ReportError::Io`] — CSV assembly failed.
    pub async fn generate(
        &self,
        folders: &[ReportFolder],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<CompiledReport, ReportError> {
        let listing_paths = validate(folders, start_date, end_date)?;

        self.persist_report_record(folders, start_date, end_date).await;

        let accounts = self
            .client
            .fetch_all_accounts(self.page_size, self.max_pages)
            .await?;
        tracing::info!(accounts = accounts.len(), "fetched tracked accounts");

        let mut fetched: Vec<(Platform, Post)> = Vec::new();
        for (folder, path) in folders.iter().zip(&listing_paths) {
            let posts = self
                .client
                .fetch_all_posts(
                    path,
                    folder.id,
                    start_date,
                    end_date,
                    self.page_size,
                    self.max_pages,
                )
                .await?;
            tracing::info!(folder_id = folder.id, path = %path, posts = posts.len(), "fetched folder");
            fetched.extend(posts.into_iter().map(|p| (folder.platform, p)));
        }

        let mut stats = MatchStats::default();
        let mut rows: Vec<ReportRow> = Vec::with_capacity(fetched.len());
        for (platform, post) in &fetched {
            let (row, matched) = compile_row(*platform, post, &accounts);
            stats.total += 1;
            if matched {
                stats.matched += 1;
            } else {
                stats.unmatched += 1;
            }
            rows.push(row);
        }

        let csv = write_csv(&rows)?;
        let file_name = format!("social_media_report_{}.csv", Utc::now().format("%Y-%m-%d"));
        tracing::info!(
            rows = rows.len(),
            matched = stats.matched,
            unmatched = stats.unmatched,
            percentage = stats.percentage(),
            "report compiled"
        );

        Ok(CompiledReport {
            csv,
            file_name,
            stats,
        })
    }

    /// Projects the match rate over a bounded sample without assembling the
    /// CSV: one page per folder at the preview page size. No audit record
    /// is written.
    ///
    /// # Errors
    ///
    /// Same validation and fetch errors as [`ReportCompiler::generate`].
    pub async fn preview(
        &self,
        folders: &[ReportFolder],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<MatchStats, ReportError> {
        let listing_paths = validate(folders, start_date, end_date)?;

        let accounts = self
            .client
            .fetch_all_accounts(self.page_size, self.max_pages)
            .await?;

        let mut stats = MatchStats::default();
        for (folder, path) in folders.iter().zip(&listing_paths) {
            let page = self
                .client
                .fetch_posts_page(
                    path,
                    folder.id,
                    start_date,
                    end_date,
                    1,
                    self.preview_page_size,
                )
                .await?;
            for post in &page.results {
                let username = extract_username(folder.platform, &post.discovery_input);
                let matched = match_account(folder.platform, &username, &accounts).is_some();
                stats.total += 1;
                if matched {
                    stats.matched += 1;
                } else {
                    stats.unmatched += 1;
                }
            }
        }

        tracing::info!(
            total = stats.total,
            matched = stats.matched,
            percentage = stats.percentage(),
            "match preview sampled"
        );
        Ok(stats)
    }

    /// Best-effort audit record; failure is never fatal.
    async fn persist_report_record(
        &self,
        folders: &[ReportFolder],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) {
        let folder_ids: Vec<i64> = folders.iter().map(|f| f.id).collect();
        let record = ReportRecord {
            name: "Social Media Report".to_owned(),
            description: format!("Report for {start_date} to {end_date}"),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            source_folders: serde_json::to_string(&folder_ids).unwrap_or_else(|_| "[]".to_owned()),
        };

        if let Err(e) = self.client.save_report(&record).await {
            tracing::warn!(error = %e, "failed to persist report record; continuing");
        }
    }
}

/// Pre-network validation: folders selected, date range sane, every folder's
/// listing resolvable. Returns the resolved listing paths in folder order.
fn validate(
    folders: &[ReportFolder],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<String>, ReportError> {
    if folders.is_empty() {
        return Err(ReportError::Validation(
            "no folders selected".to_owned(),
        ));
    }
    if start_date > end_date {
        return Err(ReportError::Validation(format!(
            "start date {start_date} is after end date {end_date}"
        )));
    }
    folders.iter().map(ReportFolder::listing_path).collect()
}

/// Extracts, matches, and builds one row for one post. Returns the row and
/// whether the post matched a tracked account.
fn compile_row(
    platform: Platform,
    post: &Post,
    accounts: &[TrackedAccount],
) -> (ReportRow, bool) {
    let username = extract_username(platform, &post.discovery_input);
    let matched = match_account(platform, &username, accounts);
    let row = ReportRow::from_post(post, platform, username, matched);
    (row, matched.is_some())
}
