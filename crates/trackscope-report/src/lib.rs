pub mod compiler;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod rows;

pub use compiler::{CompiledReport, MatchStats, ReportCompiler, ReportFolder};
pub use error::ReportError;
pub use extract::extract_username;
pub use matcher::match_account;
pub use rows::{write_csv, ReportRow, REPORT_HEADER};
