//! Session transcript recording
//!
//! Optional JSON record of one interactive session: who said what, when,
//! under which session id. Recording problems are reported as warnings by
//! callers; they must never end the session.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Who produced a transcript entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    System,
}

/// One turn of the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// When the turn happened
    pub timestamp: DateTime<Utc>,

    /// Who spoke
    pub speaker: Speaker,

    /// What was said
    pub text: String,
}

impl TranscriptEntry {
    /// Entry for a line the user typed
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// Entry for a reply the session displayed
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            speaker: Speaker::System,
            text: text.into(),
        }
    }
}

/// Complete transcript data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Unique identifier for the session
    pub session_id: String,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// All recorded turns
    pub entries: Vec<TranscriptEntry>,
}

/// Records session turns and saves them to a file after every entry
pub struct TranscriptRecorder {
    session_id: String,
    started_at: DateTime<Utc>,
    entries: RwLock<Vec<TranscriptEntry>>,
    file_path: PathBuf,
}

impl TranscriptRecorder {
    /// Create a recorder that saves to the given file
    pub fn with_file(session_id: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            session_id: session_id.into(),
            started_at: Utc::now(),
            entries: RwLock::new(Vec::new()),
            file_path: path.as_ref().to_path_buf(),
        }
    }

    /// Session id this recorder belongs to
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Record one entry and persist the transcript
    pub async fn record(&self, entry: TranscriptEntry) -> Result<()> {
        {
            let mut entries = self.entries.write().await;
            entries.push(entry);
        }
        self.save().await
    }

    /// Number of recorded entries
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn save(&self) -> Result<()> {
        let transcript = Transcript {
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            entries: self.entries.read().await.clone(),
        };

        let content = serde_json::to_string_pretty(&transcript)?;
        fs::write(&self.file_path, content).await?;
        Ok(())
    }
}
