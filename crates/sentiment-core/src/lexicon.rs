//! Word-level polarity/subjectivity lexicon.
//!
//! Each entry maps a lowercase word to a `(polarity, subjectivity)` pair.
//! Negations and intensifiers are kept separately and act on the next
//! scored word.

use crate::error::{Result, SentimentError};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Built-in vocabulary: (word, polarity, subjectivity).
const DEFAULT_WORDS: &[(&str, f64, f64)] = &[
    // Positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("brilliant", 0.9, 1.0),
    ("perfect", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("like", 0.2, 0.4),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("pleased", 0.5, 0.75),
    ("delighted", 0.7, 0.9),
    ("beautiful", 0.85, 1.0),
    ("pretty", 0.25, 1.0),
    ("fun", 0.3, 0.2),
    ("cool", 0.35, 0.65),
    ("helpful", 0.5, 0.5),
    ("impressive", 1.0, 1.0),
    ("recommend", 0.4, 0.5),
    ("satisfied", 0.5, 0.6),
    ("superb", 1.0, 1.0),
    ("favorite", 0.5, 1.0),
    ("friendly", 0.375, 0.5),
    ("easy", 0.43, 0.83),
    ("fast", 0.2, 0.6),
    ("clean", 0.37, 0.69),
    ("fresh", 0.3, 0.5),
    ("positive", 0.23, 0.55),
    ("success", 0.3, 0.3),
    ("successful", 0.75, 0.95),
    ("win", 0.8, 0.4),
    ("thanks", 0.2, 0.2),
    ("thank", 0.2, 0.2),
    ("exciting", 0.3, 0.8),
    ("excited", 0.375, 0.75),
    ("fine", 0.42, 0.5),
    ("calm", 0.3, 0.75),
    ("incredible", 0.9, 0.9),
    ("outstanding", 0.5, 0.5),
    ("smart", 0.21, 0.64),
    // Negative
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("poor", -0.4, 0.6),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.7),
    ("dislike", -0.3, 0.5),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("upset", -0.5, 0.75),
    ("annoying", -0.8, 0.9),
    ("annoyed", -0.4, 0.8),
    ("boring", -1.0, 1.0),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("ugly", -0.7, 1.0),
    ("stupid", -0.8, 1.0),
    ("useless", -0.5, 0.2),
    ("broken", -0.4, 0.4),
    ("slow", -0.3, 0.4),
    ("expensive", -0.5, 0.7),
    ("difficult", -0.5, 1.0),
    ("hard", -0.29, 0.54),
    ("wrong", -0.5, 0.9),
    ("fail", -0.5, 0.3),
    ("failed", -0.5, 0.3),
    ("failure", -0.3, 0.3),
    ("problem", -0.2, 0.3),
    ("painful", -0.7, 0.9),
    ("sick", -0.71, 0.86),
    ("tired", -0.4, 0.7),
    ("scary", -0.5, 1.0),
    ("dirty", -0.6, 0.8),
    ("rude", -0.6, 0.8),
    ("mediocre", -0.3, 0.6),
    ("pathetic", -1.0, 1.0),
    ("disgusting", -1.0, 1.0),
    ("negative", -0.3, 0.4),
    ("lose", -0.4, 0.3),
    ("lost", -0.3, 0.3),
    ("crash", -0.5, 0.5),
    ("unfortunately", -0.5, 1.0),
    ("mad", -0.625, 1.0),
    ("frustrating", -0.4, 0.8),
    ("frustrated", -0.7, 0.7),
    ("lonely", -0.3, 0.6),
    ("miserable", -1.0, 1.0),
];

const DEFAULT_NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "nobody", "nothing", "none", "cannot", "can't",
    "cant", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't",
    "isnt", "aren't", "arent", "wasn't", "wasnt", "weren't", "werent", "shouldn't", "wouldn't",
    "couldn't", "hardly", "barely",
];

const DEFAULT_INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.4),
    ("so", 1.2),
    ("too", 1.2),
    ("super", 1.4),
    ("quite", 1.1),
    ("highly", 1.3),
    ("most", 1.3),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("rather", 0.9),
    ("fairly", 0.8),
];

/// Extension file format: `[words] word = [polarity, subjectivity]`,
/// `[intensifiers] word = multiplier`, `negations = [...]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LexiconFile {
    words: HashMap<String, (f64, f64)>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

/// A single lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordScore {
    pub polarity: f64,
    pub subjectivity: f64,
}

pub struct Lexicon {
    words: HashMap<String, WordScore>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// Lexicon populated with the built-in vocabulary.
    pub fn new() -> Self {
        let words = DEFAULT_WORDS
            .iter()
            .map(|(w, p, s)| {
                (
                    w.to_string(),
                    WordScore {
                        polarity: *p,
                        subjectivity: *s,
                    },
                )
            })
            .collect();
        let negations = DEFAULT_NEGATIONS.iter().map(|w| w.to_string()).collect();
        let intensifiers = DEFAULT_INTENSIFIERS
            .iter()
            .map(|(w, m)| (w.to_string(), *m))
            .collect();

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// Lexicon with no entries at all.
    pub fn empty() -> Self {
        Self {
            words: HashMap::new(),
            negations: HashSet::new(),
            intensifiers: HashMap::new(),
        }
    }

    /// Built-in vocabulary extended (and overridden) from a TOML file.
    pub fn with_extensions(path: &Path) -> Result<Self> {
        let mut lexicon = Self::new();
        lexicon.extend_from_file(path)?;
        Ok(lexicon)
    }

    /// Merge entries from a TOML lexicon file. Later entries win.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)?;
        self.extend_from_str(&contents).map_err(|e| match e {
            SentimentError::Lexicon { message, .. } => SentimentError::Lexicon {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), words = self.len(), "Extended lexicon");
        Ok(())
    }

    pub fn extend_from_str(&mut self, contents: &str) -> Result<()> {
        let file: LexiconFile = toml::from_str(contents).map_err(|e| SentimentError::Lexicon {
            path: "<inline>".into(),
            message: e.to_string(),
        })?;

        for (word, (polarity, subjectivity)) in file.words {
            self.add_word(&word, polarity, subjectivity)?;
        }
        for (word, multiplier) in file.intensifiers {
            self.intensifiers.insert(word.to_lowercase(), multiplier);
        }
        for word in file.negations {
            self.negations.insert(word.to_lowercase());
        }
        Ok(())
    }

    /// Add or replace a word. Scores must lie in their documented ranges.
    pub fn add_word(&mut self, word: &str, polarity: f64, subjectivity: f64) -> Result<()> {
        if !(-1.0..=1.0).contains(&polarity) || !(0.0..=1.0).contains(&subjectivity) {
            return Err(SentimentError::Lexicon {
                path: "<inline>".into(),
                message: format!(
                    "score out of range for '{}': polarity {}, subjectivity {}",
                    word, polarity, subjectivity
                ),
            });
        }
        self.words.insert(
            word.to_lowercase(),
            WordScore {
                polarity,
                subjectivity,
            },
        );
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<WordScore> {
        self.words.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    pub fn intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    /// Number of scored words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
