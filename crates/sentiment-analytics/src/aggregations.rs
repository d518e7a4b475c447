//! History aggregation.
//!
//! Summarizes an ordered list of analysis records into category counts,
//! running averages, the polarity trend, and the recent-entries slice shown
//! beside the input form. Everything here is a single linear scan.

use sentiment_core::{AnalysisRecord, SentimentCategory};
use serde::{Deserialize, Serialize};

/// Counts and averages over a session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Mean polarity, `None` for an empty history.
    pub avg_polarity: Option<f64>,
    /// Mean subjectivity, `None` for an empty history.
    pub avg_subjectivity: Option<f64>,
}

/// One slice of the sentiment distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub category: SentimentCategory,
    pub count: usize,
    /// Share of the total (0.0..1.0); zero for an empty history.
    pub share: f64,
}

/// A record prepared for the recent history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub emoji: String,
    pub sentiment: SentimentCategory,
    pub preview: String,
    pub polarity: f64,
    pub subjectivity: f64,
    pub timestamp: String,
}

impl HistorySummary {
    pub fn from_records(records: &[AnalysisRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            positive: 0,
            negative: 0,
            neutral: 0,
            avg_polarity: None,
            avg_subjectivity: None,
        };

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        for record in records {
            match record.sentiment {
                SentimentCategory::Positive => summary.positive += 1,
                SentimentCategory::Negative => summary.negative += 1,
                SentimentCategory::Neutral => summary.neutral += 1,
            }
            polarity_sum += record.polarity;
            subjectivity_sum += record.subjectivity;
        }

        if !records.is_empty() {
            let n = records.len() as f64;
            summary.avg_polarity = Some(polarity_sum / n);
            summary.avg_subjectivity = Some(subjectivity_sum / n);
        }

        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, category: SentimentCategory) -> usize {
        match category {
            SentimentCategory::Positive => self.positive,
            SentimentCategory::Negative => self.negative,
            SentimentCategory::Neutral => self.neutral,
        }
    }

    /// Per-category counts in display order (Positive, Negative, Neutral).
    pub fn distribution(&self) -> Vec<DistributionSlice> {
        SentimentCategory::ALL
            .iter()
            .map(|&category| {
                let count = self.count(category);
                DistributionSlice {
                    category,
                    count,
                    share: if self.total == 0 {
                        0.0
                    } else {
                        count as f64 / self.total as f64
                    },
                }
            })
            .collect()
    }
}

/// Polarity series in insertion order.
pub fn trend(records: &[AnalysisRecord]) -> Vec<f64> {
    records.iter().map(|r| r.polarity).collect()
}

/// A trend line needs at least two points.
pub fn has_trend(records: &[AnalysisRecord]) -> bool {
    records.len() > 1
}

/// The last `limit` records, newest first, with shortened text.
pub fn recent_entries(
    records: &[AnalysisRecord],
    limit: usize,
    preview_chars: usize,
) -> Vec<RecentEntry> {
    let start = records.len().saturating_sub(limit);
    records[start..]
        .iter()
        .rev()
        .map(|r| RecentEntry {
            emoji: r.emoji.clone(),
            sentiment: r.sentiment,
            preview: r.preview(preview_chars),
            polarity: r.polarity,
            subjectivity: r.subjectivity,
            timestamp: r.formatted_timestamp(),
        })
        .collect()
}
