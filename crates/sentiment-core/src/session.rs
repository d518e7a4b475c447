use crate::config::AppConfig;
use crate::types::AnalysisRecord;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Insertion-ordered list of analyses for one session.
///
/// Records are only ever appended; the list is emptied as a whole by
/// [`SessionHistory::clear`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory {
    records: Vec<AnalysisRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AnalysisRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&AnalysisRecord> {
        self.records.last()
    }

    /// The last `n` records, newest first.
    pub fn recent(&self, n: usize) -> Vec<&AnalysisRecord> {
        let start = self.records.len().saturating_sub(n);
        self.records[start..].iter().rev().collect()
    }
}

impl From<Vec<AnalysisRecord>> for SessionHistory {
    fn from(records: Vec<AnalysisRecord>) -> Self {
        Self { records }
    }
}

/// Per-visitor state: the analysis history plus UI toggles.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub history: SessionHistory,
    /// Whether the detailed analysis panel is expanded.
    pub show_details: bool,
    /// Whether the page still shows the result card for the last record.
    pub has_result: bool,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self::new_at(Utc::now())
    }

    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            history: SessionHistory::new(),
            show_details: false,
            has_result: false,
            created_at: now,
            last_seen: now,
        }
    }
}

impl Session {
    /// Record shown in the result card, if one is current.
    pub fn current_result(&self) -> Option<&AnalysisRecord> {
        if self.has_result {
            self.history.last()
        } else {
            None
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory registry of live sessions keyed by id.
pub struct SessionManager {
    sessions: HashMap<String, Session>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionManager {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_limits(config.session.max_sessions, config.session.idle_timeout_secs)
    }

    pub fn with_limits(max_sessions: usize, idle_timeout_secs: u64) -> Self {
        Self {
            sessions: HashMap::new(),
            max_sessions: max_sessions.max(1),
            idle_timeout: i64::try_from(idle_timeout_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    /// Look up a session by id, creating a fresh one when the id is absent
    /// or unknown. Marks the session as seen.
    pub fn get_or_create(&mut self, id: Option<&str>) -> &mut Session {
        self.get_or_create_at(id, Utc::now())
    }

    pub fn get_or_create_at(&mut self, id: Option<&str>, now: DateTime<Utc>) -> &mut Session {
        self.evict_idle(now);

        let id = match id {
            Some(id) if self.sessions.contains_key(id) => id.to_string(),
            _ => {
                self.make_room();
                let session = Session::new_at(now);
                let id = session.id.clone();
                tracing::debug!(session_id = %id, live = self.sessions.len() + 1, "Created session");
                self.sessions.insert(id.clone(), session);
                id
            }
        };

        let session = self
            .sessions
            .entry(id)
            .or_insert_with(|| Session::new_at(now));
        session.last_seen = now;
        session
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    /// Drop sessions idle for longer than the configured timeout.
    /// Returns the number of sessions evicted.
    pub fn evict_idle(&mut self, now: DateTime<Utc>) -> usize {
        let timeout = self.idle_timeout;
        let before = self.sessions.len();
        self.sessions.retain(|_, s| now - s.last_seen <= timeout);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "Evicted idle sessions");
        }
        evicted
    }

    /// Evict least recently seen sessions until one more fits.
    fn make_room(&mut self) {
        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .values()
                .min_by_key(|s| s.last_seen)
                .map(|s| s.id.clone());
            match oldest {
                Some(id) => {
                    tracing::debug!(session_id = %id, "Evicting least recently seen session");
                    self.sessions.remove(&id);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
