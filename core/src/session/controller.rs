//! Selection state machine
//!
//! Owns "last results" and "currently selected file" for one interactive
//! session and turns raw user input into deterministic transitions. All
//! transitions are synchronous and total; every reply the user sees for a
//! selection event is produced here so the displayed numbering always
//! matches the stored set.

use super::messages;
use crate::error::{Result, SessionError};

/// Selection state for one interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    /// No search results on hand
    NoResults,

    /// A search produced results; none selected yet
    ResultsPending(Vec<String>),

    /// One result is selected and ready to open
    FileChosen {
        results: Vec<String>,
        path: String,
    },
}

/// Classified user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// `exit` / `quit`, case-insensitive
    Exit,

    /// The literal token `open`, case-insensitive
    Open,

    /// A bare integer while results are on hand
    Select(usize),

    /// Anything else: forwarded to the orchestration collaborator
    Query(String),
}

/// The selection state machine
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    /// Create a controller in the initial `NoResults` state
    pub fn new() -> Self {
        Self {
            state: SelectionState::NoResults,
        }
    }

    /// Current state
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Whether a result set is currently on hand
    pub fn has_results(&self) -> bool {
        !self.results().is_empty()
    }

    fn results(&self) -> &[String] {
        match &self.state {
            SelectionState::NoResults => &[],
            SelectionState::ResultsPending(results) => results,
            SelectionState::FileChosen { results, .. } => results,
        }
    }

    /// Classify one line of raw user input.
    ///
    /// A purely numeric line is a selection only while results are on hand;
    /// otherwise it is treated as ordinary query text, as the original
    /// behavior had it.
    pub fn classify(&self, line: &str) -> InputEvent {
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        if lowered == "exit" || lowered == "quit" {
            return InputEvent::Exit;
        }

        if lowered == "open" {
            return InputEvent::Open;
        }

        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let (true, Ok(n)) = (self.has_results(), trimmed.parse::<usize>()) {
                return InputEvent::Select(n);
            }
        }

        InputEvent::Query(trimmed.to_string())
    }

    /// Absorb a freshly interpreted result set, discarding any previous set
    /// and selection, and render the display lines for it.
    pub fn absorb_results(&mut self, paths: Vec<String>) -> Vec<String> {
        if paths.is_empty() {
            self.state = SelectionState::NoResults;

            let mut lines = vec![messages::NO_FILES.to_string()];
            lines.extend(messages::SEARCH_TIPS.iter().map(|tip| format!("- {}", tip)));
            return lines;
        }

        let lines = if paths.len() == 1 {
            vec![
                messages::FILE_FOUND.to_string(),
                format!("  - {}", paths[0]),
                messages::TYPE_OPEN.to_string(),
            ]
        } else {
            let mut lines = vec![messages::FILES_FOUND.to_string()];
            lines.extend(
                paths
                    .iter()
                    .enumerate()
                    .map(|(i, path)| format!("  {}: {}", i + 1, path)),
            );
            lines.push(messages::ENTER_NUMBER.to_string());
            lines
        };

        self.state = SelectionState::ResultsPending(paths);
        lines
    }

    /// Handle a numeric selection against the current result set
    pub fn select(&mut self, n: usize) -> Vec<String> {
        let results = self.results().to_vec();
        if n == 0 || n > results.len() {
            return vec![messages::INVALID_NUMBER.to_string()];
        }

        let path = results[n - 1].clone();
        let reply = vec![
            format!("{}:", messages::TYPE_OPEN),
            format!("  - {}", path),
        ];
        self.state = SelectionState::FileChosen { results, path };
        reply
    }

    /// The path an `open` command should act on.
    ///
    /// An explicit selection always wins; with no selection, a pending set
    /// of exactly one entry is opened implicitly. Anything else is
    /// `NoFileSelected`.
    pub fn open_target(&self) -> Result<String> {
        match &self.state {
            SelectionState::FileChosen { path, .. } => Ok(path.clone()),
            SelectionState::ResultsPending(results) if results.len() == 1 => {
                Ok(results[0].clone())
            }
            _ => Err(SessionError::NoFileSelected.into()),
        }
    }

    /// An open attempt succeeded: the selection is cleared
    pub fn open_succeeded(&mut self) -> Vec<String> {
        self.state = SelectionState::NoResults;
        vec![messages::FILE_OPENED.to_string()]
    }

    /// An open attempt failed: state is preserved so the user can retry
    /// `open` without re-searching
    pub fn open_failed(&self, reason: &str) -> Vec<String> {
        vec![format!("{} {}", messages::FILE_ERROR, reason)]
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}
