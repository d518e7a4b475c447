//! Sentiment scoring backends.
//!
//! The rest of the crate only talks to [`SentimentScorer`]; the default
//! backend is [`LexiconScorer`], which averages per-word scores from a
//! [`Lexicon`] with negation and intensifier handling.

use crate::lexicon::Lexicon;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Factor applied to a word's polarity when a negation precedes it.
const NEGATION_FACTOR: f64 = -0.5;

/// Polarity and subjectivity for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// -1.0 (negative) to 1.0 (positive).
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective).
    pub subjectivity: f64,
}

impl Scores {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// A pluggable sentiment backend.
pub trait SentimentScorer: Send + Sync {
    /// Score a piece of text. Text with no signal scores (0.0, 0.0).
    fn score(&self, text: &str) -> Scores;

    /// Backend name, for logs and the health endpoint.
    fn name(&self) -> &str;
}

fn token_regex() -> &'static Regex {
    static TOKENS: OnceLock<Regex> = OnceLock::new();
    TOKENS.get_or_init(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("token pattern is valid"))
}

/// Lowercased word tokens. Curly apostrophes are folded to ASCII.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
    token_regex()
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(Lexicon::new())
    }
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Per-word hits after applying modifiers, in text order.
    pub fn hits(&self, text: &str) -> Vec<(String, Scores)> {
        let mut hits = Vec::new();
        let mut negated = false;
        let mut intensity: f64 = 1.0;

        for token in tokenize(text) {
            if self.lexicon.is_negation(&token) {
                negated = true;
                continue;
            }
            if let Some(multiplier) = self.lexicon.intensifier(&token) {
                intensity *= multiplier;
                continue;
            }

            if let Some(word) = self.lexicon.get(&token) {
                let mut polarity = word.polarity * intensity;
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                let scores = Scores::new(polarity, word.subjectivity * intensity);
                hits.push((token, scores));
            }

            // Modifiers only reach the immediately following word.
            negated = false;
            intensity = 1.0;
        }

        hits
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Scores {
        let hits = self.hits(text);
        if hits.is_empty() {
            return Scores::default();
        }

        let n = hits.len() as f64;
        let polarity = hits.iter().map(|(_, s)| s.polarity).sum::<f64>() / n;
        let subjectivity = hits.iter().map(|(_, s)| s.subjectivity).sum::<f64>() / n;
        Scores::new(polarity, subjectivity)
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
