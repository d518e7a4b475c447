use crate::error::SentimentError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Polarity above this is Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below this is Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Display format for record timestamps (also used in CSV export).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Three-way sentiment bucket derived from polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    /// Fixed display order used by statistics and charts.
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Negative,
        SentimentCategory::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Negative => "Negative",
            SentimentCategory::Neutral => "Neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "😊",
            SentimentCategory::Negative => "😢",
            SentimentCategory::Neutral => "😐",
        }
    }

    /// Accent color (hex) used for badges and chart segments.
    pub fn color(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "#10b981",
            SentimentCategory::Negative => "#ef4444",
            SentimentCategory::Neutral => "#f59e0b",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "positive-badge",
            SentimentCategory::Negative => "negative-badge",
            SentimentCategory::Neutral => "neutral-badge",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentCategory {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Positive" => Ok(SentimentCategory::Positive),
            "Negative" => Ok(SentimentCategory::Negative),
            "Neutral" => Ok(SentimentCategory::Neutral),
            other => Err(SentimentError::UnknownCategory(other.to_string())),
        }
    }
}

/// Bucket a polarity score. Both thresholds are exclusive.
pub fn classify(polarity: f64) -> SentimentCategory {
    if polarity > POSITIVE_THRESHOLD {
        SentimentCategory::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
        SentimentCategory::Negative
    } else {
        SentimentCategory::Neutral
    }
}

/// One scored piece of text. Immutable once appended to a history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub text: String,
    pub sentiment: SentimentCategory,
    pub polarity: f64,
    pub subjectivity: f64,
    pub timestamp: DateTime<Local>,
    pub emoji: String,
}

impl AnalysisRecord {
    /// Build a record from raw scores, deriving category and emoji.
    pub fn new(
        text: impl Into<String>,
        polarity: f64,
        subjectivity: f64,
        timestamp: DateTime<Local>,
    ) -> Self {
        let sentiment = classify(polarity);
        Self {
            text: text.into(),
            sentiment,
            polarity,
            subjectivity,
            timestamp,
            emoji: sentiment.emoji().to_string(),
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Text shortened to `max_chars` characters, with "..." appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }

    pub fn metrics(&self) -> TextMetrics {
        TextMetrics::of(&self.text)
    }
}

/// Simple size measures shown in the detailed analysis view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub word_count: usize,
    pub char_count: usize,
}

impl TextMetrics {
    pub fn of(text: &str) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
        }
    }
}
