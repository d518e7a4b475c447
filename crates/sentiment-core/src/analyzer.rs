use crate::config::AppConfig;
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::scorer::{LexiconScorer, SentimentScorer};
use crate::types::AnalysisRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Turns raw text into [`AnalysisRecord`]s using a pluggable scorer.
#[derive(Clone)]
pub struct Analyzer {
    scorer: Arc<dyn SentimentScorer>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer::default()))
    }
}

impl Analyzer {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Build the analyzer described by the config, loading any lexicon
    /// extension file it names.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let lexicon = match &config.analysis.lexicon_path {
            Some(path) => Lexicon::with_extensions(path)?,
            None => Lexicon::new(),
        };
        tracing::debug!(words = lexicon.len(), "Lexicon ready");
        Ok(Self::new(Arc::new(LexiconScorer::new(lexicon))))
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Score `text`. Blank input is skipped and yields `None`.
    pub fn analyze(&self, text: &str) -> Option<AnalysisRecord> {
        self.analyze_at(text, Local::now())
    }

    pub fn analyze_at(&self, text: &str, timestamp: DateTime<Local>) -> Option<AnalysisRecord> {
        if text.trim().is_empty() {
            return None;
        }
        let scores = self.scorer.score(text);
        let record = AnalysisRecord::new(text, scores.polarity, scores.subjectivity, timestamp);
        tracing::debug!(
            sentiment = %record.sentiment,
            polarity = record.polarity,
            subjectivity = record.subjectivity,
            "Analyzed text"
        );
        Some(record)
    }
}

/// Human-facing reading of a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Strength of the polarity regardless of direction.
    pub confidence: f64,
    /// Polarity mapped onto 0.0..=1.0 for a progress gauge.
    pub polarity_gauge: f64,
    pub tone: String,
    pub is_subjective: bool,
    pub subjectivity_reading: String,
}

impl Interpretation {
    pub fn of(record: &AnalysisRecord) -> Self {
        let is_subjective = record.subjectivity > 0.5;
        Self {
            confidence: record.polarity.abs(),
            polarity_gauge: ((record.polarity + 1.0) / 2.0).clamp(0.0, 1.0),
            tone: format!(
                "Analyzed text has a {} tone",
                record.sentiment.as_str().to_lowercase()
            ),
            is_subjective,
            subjectivity_reading: if is_subjective {
                "more subjective and opinion-based".into()
            } else {
                "more objective and factual".into()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::Scores;
    use crate::types::SentimentCategory;

    struct FixedScorer(Scores);

    impl SentimentScorer for FixedScorer {
        fn score(&self, _text: &str) -> Scores {
            self.0
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn fixed(polarity: f64, subjectivity: f64) -> Analyzer {
        Analyzer::new(Arc::new(FixedScorer(Scores::new(polarity, subjectivity))))
    }

    #[test]
    fn test_blank_input_is_skipped() {
        let analyzer = Analyzer::default();
        assert!(analyzer.analyze("").is_none());
        assert!(analyzer.analyze("   \n\t").is_none());
    }

    #[test]
    fn test_record_keeps_original_text() {
        let analyzer = fixed(0.3, 0.4);
        let record = analyzer.analyze("  Hello there ").unwrap();
        assert_eq!(record.text, "  Hello there ");
        assert_eq!(record.sentiment, SentimentCategory::Positive);
        assert_eq!(record.emoji, "😊");
        assert_eq!(record.polarity, 0.3);
        assert_eq!(record.subjectivity, 0.4);
    }

    #[test]
    fn test_default_analyzer_end_to_end() {
        let analyzer = Analyzer::default();
        assert_eq!(analyzer.scorer_name(), "lexicon");
        let record = analyzer.analyze("What a horrible, boring day").unwrap();
        assert_eq!(record.sentiment, SentimentCategory::Negative);
        let record = analyzer.analyze("The train leaves at six").unwrap();
        assert_eq!(record.sentiment, SentimentCategory::Neutral);
    }

    #[test]
    fn test_from_config_with_lexicon_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("extra.toml");
        std::fs::write(&path, "[words]\nsplendiferous = [0.9, 0.9]\n").unwrap();

        let mut config = AppConfig::default();
        config.analysis.lexicon_path = Some(path);
        let analyzer = Analyzer::from_config(&config).unwrap();
        let record = analyzer.analyze("splendiferous").unwrap();
        assert_eq!(record.sentiment, SentimentCategory::Positive);
    }

    #[test]
    fn test_from_config_missing_lexicon_file() {
        let mut config = AppConfig::default();
        config.analysis.lexicon_path = Some("/definitely/not/here.toml".into());
        assert!(Analyzer::from_config(&config).is_err());
    }

    #[test]
    fn test_interpretation() {
        let record = fixed(-0.6, 0.8).analyze("x").unwrap();
        let interp = Interpretation::of(&record);
        assert!((interp.confidence - 0.6).abs() < 1e-9);
        assert!((interp.polarity_gauge - 0.2).abs() < 1e-9);
        assert_eq!(interp.tone, "Analyzed text has a negative tone");
        assert!(interp.is_subjective);
        assert_eq!(interp.subjectivity_reading, "more subjective and opinion-based");

        let record = fixed(0.0, 0.5).analyze("x").unwrap();
        let interp = Interpretation::of(&record);
        assert!(!interp.is_subjective);
        assert_eq!(interp.polarity_gauge, 0.5);
        assert_eq!(interp.tone, "Analyzed text has a neutral tone");
    }
}
