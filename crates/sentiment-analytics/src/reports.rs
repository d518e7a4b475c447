//! Plain-text reports for the terminal.

use crate::aggregations::{recent_entries, HistorySummary};
use sentiment_core::{AnalysisRecord, Interpretation, SentimentCategory};

/// Report generator for REPL and CLI output.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Statistics block: totals, per-category counts, and averages.
    pub fn text_summary(summary: &HistorySummary) -> String {
        if summary.is_empty() {
            return "No analyses yet. Start by entering some text above!\n".to_string();
        }

        let mut output = String::new();
        output.push_str("Statistics\n");
        output.push_str(&format!("  Total Analyses:   {}\n", summary.total));
        for slice in summary.distribution() {
            output.push_str(&format!(
                "  {} {:<9} {:>4} ({:.0}%)\n",
                slice.category.emoji(),
                slice.category.as_str(),
                slice.count,
                slice.share * 100.0
            ));
        }
        if let Some(p) = summary.avg_polarity {
            output.push_str(&format!("  Avg Polarity:     {:.3}\n", p));
        }
        if let Some(s) = summary.avg_subjectivity {
            output.push_str(&format!("  Avg Subjectivity: {:.3}\n", s));
        }
        output
    }

    /// The recent history list, newest first.
    pub fn history_list(records: &[AnalysisRecord], limit: usize, preview_chars: usize) -> String {
        let entries = recent_entries(records, limit, preview_chars);
        if entries.is_empty() {
            return "No history.\n".to_string();
        }

        let mut output = String::new();
        for entry in entries {
            output.push_str(&format!(
                "{} [{}] {}\n    Polarity: {:.3}  Subjectivity: {:.3}  {}\n",
                entry.emoji,
                entry.sentiment,
                entry.preview,
                entry.polarity,
                entry.subjectivity,
                entry.timestamp
            ));
        }
        output
    }

    /// One-line result for a freshly analyzed record.
    pub fn result_line(record: &AnalysisRecord) -> String {
        let interp = Interpretation::of(record);
        format!(
            "{} Sentiment: {}  Confidence: {:.2}  Subjectivity: {:.2}",
            record.emoji, record.sentiment, interp.confidence, record.subjectivity
        )
    }

    /// The "Interpretation" paragraph of the detailed analysis.
    pub fn interpretation(record: &AnalysisRecord) -> String {
        let interp = Interpretation::of(record);
        let sentiment = record.sentiment.as_str().to_lowercase();
        format!(
            "Polarity ranges from -1 (very negative) to +1 (very positive). \
             Your text scored {:.3}, indicating a {} sentiment.\n\
             Subjectivity ranges from 0 (very objective) to 1 (very subjective). \
             Your text scored {:.3}, meaning it is {}.",
            record.polarity, sentiment, record.subjectivity, interp.subjectivity_reading
        )
    }

    /// Detailed metric block: scores plus word and character counts.
    pub fn details(record: &AnalysisRecord) -> String {
        let metrics = record.metrics();
        format!(
            "  Polarity Score: {:.3}\n  Subjectivity:   {:.3}\n  Word Count:     {}\n  Characters:     {}\n",
            record.polarity, record.subjectivity, metrics.word_count, metrics.char_count
        )
    }

    /// Fixed-width bar for a category share.
    pub fn share_bar(category: SentimentCategory, share: f64, width: usize) -> String {
        let filled = ((share.clamp(0.0, 1.0)) * width as f64).round() as usize;
        format!(
            "{} {}{}",
            category.emoji(),
            "█".repeat(filled),
            "░".repeat(width - filled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn record(text: &str, polarity: f64, subjectivity: f64) -> AnalysisRecord {
        AnalysisRecord::new(text, polarity, subjectivity, Local::now())
    }

    #[test]
    fn test_empty_summary_hint() {
        let report = ReportGenerator::text_summary(&HistorySummary::from_records(&[]));
        assert!(report.contains("No analyses yet"));
    }

    #[test]
    fn test_text_summary() {
        let records = vec![record("good", 0.7, 0.6), record("bad", -0.7, 0.7)];
        let report = ReportGenerator::text_summary(&HistorySummary::from_records(&records));
        assert!(report.contains("Total Analyses:   2"));
        assert!(report.contains("Avg Polarity:     0.000"));
        assert!(report.contains("Avg Subjectivity: 0.650"));
        assert!(report.contains("Positive"));
        assert!(report.contains("(50%)"));
    }

    #[test]
    fn test_history_list_newest_first() {
        let records = vec![record("first", 0.7, 0.6), record("second", -0.7, 0.67)];
        let list = ReportGenerator::history_list(&records, 5, 100);
        let first = list.find("first").unwrap();
        let second = list.find("second").unwrap();
        assert!(second < first);
        assert_eq!(ReportGenerator::history_list(&[], 5, 100), "No history.\n");
    }

    #[test]
    fn test_interpretation_text() {
        let text = ReportGenerator::interpretation(&record("x", 0.25, 0.9));
        assert!(text.contains("scored 0.250, indicating a positive sentiment"));
        assert!(text.contains("more subjective and opinion-based"));

        let text = ReportGenerator::interpretation(&record("x", 0.0, 0.1));
        assert!(text.contains("neutral sentiment"));
        assert!(text.contains("more objective and factual"));
    }

    #[test]
    fn test_details_counts() {
        let details = ReportGenerator::details(&record("two words", 0.0, 0.0));
        assert!(details.contains("Word Count:     2"));
        assert!(details.contains("Characters:     9"));
    }

    #[test]
    fn test_result_line() {
        let line = ReportGenerator::result_line(&record("x", -0.5, 0.4));
        assert!(line.contains("Negative"));
        assert!(line.contains("Confidence: 0.50"));
    }

    #[test]
    fn test_share_bar() {
        assert_eq!(
            ReportGenerator::share_bar(SentimentCategory::Neutral, 0.5, 4),
            "😐 ██░░"
        );
    }
}
