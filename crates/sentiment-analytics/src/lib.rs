//! History aggregation, CSV export, and reporting for sentiment-pro sessions.
//!
//! Everything here is a pure function of an ordered slice of
//! [`sentiment_core::AnalysisRecord`]s.

pub mod aggregations;
pub mod export;
pub mod reports;

pub use aggregations::{has_trend, recent_entries, trend, DistributionSlice, HistorySummary, RecentEntry};
pub use export::{from_csv, load_csv, save_csv, to_csv};
pub use reports::ReportGenerator;
