pub mod analyzer;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod scorer;
pub mod session;
pub mod types;

pub use analyzer::{Analyzer, Interpretation};
pub use config::AppConfig;
pub use error::{Result, SentimentError};
pub use lexicon::Lexicon;
pub use scorer::{LexiconScorer, Scores, SentimentScorer};
pub use session::{Session, SessionHistory, SessionManager};
pub use types::{classify, AnalysisRecord, SentimentCategory, TextMetrics};
