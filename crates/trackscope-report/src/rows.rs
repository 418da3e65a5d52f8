//! Report rows and CSV serialization.
//!
//! The report is a flat 12-column CSV. Column order is fixed and every field
//! is double-quoted with embedded quotes doubled, so the artifact round-trips
//! through standard CSV parsers regardless of what the scraped content holds.

use csv::{QuoteStyle, WriterBuilder};
use trackscope_api::{Post, TrackedAccount};
use trackscope_core::Platform;

use crate::error::ReportError;

/// Fixed column order of the generated report.
pub const REPORT_HEADER: [&str; 12] = [
    "S/N",
    "Name",
    "IAC No.",
    "Entity",
    "Under Close Monitoring? (Yes / No)",
    "Posting Date",
    "Platform Type",
    "Post URL",
    "Username",
    "Personal/Business",
    "Keywords",
    "Content",
];

/// One line of the generated report, built one-to-one from a fetched post.
///
/// Serial number, entity, and personal/business are intentionally blank —
/// analysts fill them in after the fact. Account-derived fields are empty
/// when the post matched no tracked account.
#[derive(Debug, Clone, Default)]
pub struct ReportRow {
    pub name: String,
    pub iac_no: String,
    pub close_monitoring: String,
    pub posting_date: String,
    pub platform_type: String,
    pub post_url: String,
    pub username: String,
    pub keywords: String,
    pub content: String,
}

impl ReportRow {
    /// Builds a row from a fetched post, the username recovered from its
    /// discovery metadata, and the account it matched (if any).
    #[must_use]
    pub fn from_post(
        post: &Post,
        platform: Platform,
        username: String,
        matched: Option<&TrackedAccount>,
    ) -> Self {
        let (name, iac_no, close_monitoring) = match matched {
            Some(account) => (
                account.name.clone(),
                account.iac_no.clone(),
                if account.close_monitoring { "Yes" } else { "No" }.to_owned(),
            ),
            None => (String::new(), String::new(), String::new()),
        };

        Self {
            name,
            iac_no,
            close_monitoring,
            posting_date: post.date_posted.clone(),
            platform_type: post.platform_label(platform),
            post_url: post.url.clone(),
            username,
            keywords: post.hashtags.clone().unwrap_or_default(),
            content: post.description.clone().unwrap_or_default(),
        }
    }

    fn record(&self) -> [&str; 12] {
        [
            "",
            &self.name,
            &self.iac_no,
            "",
            &self.close_monitoring,
            &self.posting_date,
            &self.platform_type,
            &self.post_url,
            &self.username,
            "",
            &self.keywords,
            &self.content,
        ]
    }
}

/// Serializes the header plus one line per row into CSV text.
///
/// Every field is quoted (`QuoteStyle::Always`); embedded double quotes are
/// doubled per standard CSV escaping.
///
/// # Errors
///
/// Returns [`ReportError::Csv`] or [`ReportError::Io`] if serialization into
/// the in-memory buffer fails.
pub fn write_csv(rows: &[ReportRow]) -> Result<String, ReportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        writer.write_record(row.record())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_row_with_content(content: &str) -> ReportRow {
        ReportRow {
            content: content.to_owned(),
            ..ReportRow::default()
        }
    }

    #[test]
    fn output_has_one_line_per_row_plus_header() {
        let rows = vec![ReportRow::default(), ReportRow::default(), ReportRow::default()];
        let csv_text = write_csv(&rows).unwrap();
        assert_eq!(csv_text.lines().count(), 4);
    }

    #[test]
    fn header_columns_are_in_contract_order() {
        let csv_text = write_csv(&[]).unwrap();
        let header = csv_text.lines().next().unwrap();
        assert_eq!(
            header,
            "\"S/N\",\"Name\",\"IAC No.\",\"Entity\",\"Under Close Monitoring? (Yes / No)\",\
             \"Posting Date\",\"Platform Type\",\"Post URL\",\"Username\",\
             \"Personal/Business\",\"Keywords\",\"Content\""
        );
    }

    #[test]
    fn every_field_is_double_quoted() {
        let rows = vec![blank_row_with_content("plain")];
        let csv_text = write_csv(&rows).unwrap();
        let data_line = csv_text.lines().nth(1).unwrap();
        assert_eq!(data_line.matches('"').count(), 24);
    }

    #[test]
    fn embedded_quotes_are_doubled_and_round_trip() {
        let original = r#"He said "hi""#;
        let rows = vec![blank_row_with_content(original)];
        let csv_text = write_csv(&rows).unwrap();
        assert!(csv_text.contains(r#""He said ""hi""""#));

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[11], original);
    }

    #[test]
    fn matched_account_fills_account_columns() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "url": "https://www.instagram.com/p/abc/",
            "date_posted": "2025-03-01",
            "hashtags": "#a #b",
            "description": "hello"
        }))
        .unwrap();
        let account: TrackedAccount = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Alice Tan",
            "iac_no": "IAC-001",
            "close_monitoring": true
        }))
        .unwrap();

        let row = ReportRow::from_post(
            &post,
            Platform::Instagram,
            "alice.tan".to_owned(),
            Some(&account),
        );
        assert_eq!(row.name, "Alice Tan");
        assert_eq!(row.iac_no, "IAC-001");
        assert_eq!(row.close_monitoring, "Yes");
        assert_eq!(row.keywords, "#a #b");
        assert_eq!(row.content, "hello");
    }

    #[test]
    fn unmatched_post_leaves_account_columns_empty() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "url": "https://www.instagram.com/p/abc/",
            "date_posted": "2025-03-01"
        }))
        .unwrap();

        let row = ReportRow::from_post(&post, Platform::Instagram, String::new(), None);
        assert_eq!(row.name, "");
        assert_eq!(row.iac_no, "");
        assert_eq!(row.close_monitoring, "");
        assert_eq!(row.post_url, "https://www.instagram.com/p/abc/");
    }
}
