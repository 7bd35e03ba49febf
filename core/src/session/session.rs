//! Session turn driver
//!
//! Drives one interactive session over two collaborator seams: the
//! orchestration agent that turns natural-language input into result text,
//! and the opener that hands a real path to the desktop. One user line in,
//! one batch of reply lines out; a failed turn reports and leaves the loop
//! alive.

use super::controller::{InputEvent, SelectionController, SelectionState};
use super::messages;
use crate::error::{Error, Result, SessionError};
use crate::interpret::ResultInterpreter;
use crate::paths::PathResolver;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Orchestration collaborator: turns a natural-language query into
/// result text (or a textual answer)
#[async_trait]
pub trait QueryRunner: Send + Sync {
    /// Run one query to completion and return the reply text
    async fn run(&self, query: &str) -> Result<String>;
}

/// File-open collaborator: hands a real path to the default application
pub trait FileOpener: Send + Sync {
    /// Open the file at `path`, returning once the open has been dispatched
    fn open(&self, path: &Path) -> Result<()>;
}

/// Outcome of handling one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Reply lines to display; the loop continues
    Continue(Vec<String>),

    /// The user asked to leave
    Exit,
}

/// One interactive session: controller state plus collaborators
pub struct Session {
    controller: SelectionController,
    interpreter: ResultInterpreter,
    resolver: PathResolver,
    runner: Arc<dyn QueryRunner>,
    opener: Arc<dyn FileOpener>,
}

impl Session {
    /// Create a session in the initial state
    pub fn new(
        interpreter: ResultInterpreter,
        resolver: PathResolver,
        runner: Arc<dyn QueryRunner>,
        opener: Arc<dyn FileOpener>,
    ) -> Self {
        Self {
            controller: SelectionController::new(),
            interpreter,
            resolver,
            runner,
            opener,
        }
    }

    /// Current selection state
    pub fn state(&self) -> &SelectionState {
        self.controller.state()
    }

    /// Handle one line of user input.
    ///
    /// Never returns an error: anything that goes wrong inside a turn is
    /// reported as reply lines so a single bad turn cannot end the session.
    pub async fn handle_line(&mut self, line: &str) -> TurnOutcome {
        match self.controller.classify(line) {
            InputEvent::Exit => TurnOutcome::Exit,
            InputEvent::Select(n) => TurnOutcome::Continue(self.controller.select(n)),
            InputEvent::Open => TurnOutcome::Continue(self.handle_open()),
            InputEvent::Query(query) => TurnOutcome::Continue(self.handle_query(&query).await),
        }
    }

    fn handle_open(&mut self) -> Vec<String> {
        let target = match self.controller.open_target() {
            Ok(target) => target,
            Err(Error::Session(SessionError::NoFileSelected)) => {
                return vec![messages::NO_FILE_SELECTED.to_string()];
            }
            Err(e) => return vec![format!("{} {}", messages::ERROR_OCCURRED, e)],
        };

        let real_path = match self.resolver.resolve(&target) {
            Ok(path) => path,
            Err(e) => return self.controller.open_failed(&e.to_string()),
        };

        debug!("opening {}", real_path.display());
        match self.opener.open(&real_path) {
            Ok(()) => self.controller.open_succeeded(),
            Err(e) => self.controller.open_failed(&e.to_string()),
        }
    }

    async fn handle_query(&mut self, query: &str) -> Vec<String> {
        let reply = match self.runner.run(query).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("orchestration failed: {}", e);
                return vec![format!("{} {}", messages::ERROR_OCCURRED, e)];
            }
        };

        let paths = self.interpreter.interpret(&reply);
        if paths.is_empty() {
            // Not a (successful) search: show the reply itself, then the
            // no-files guidance.
            let mut lines: Vec<String> = reply.lines().map(str::to_string).collect();
            lines.extend(self.controller.absorb_results(Vec::new()));
            lines
        } else {
            debug!("raw orchestration reply: {}", reply);
            self.controller.absorb_results(paths)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted orchestration stand-in: pops replies front to back
    struct ScriptedRunner {
        replies: Mutex<Vec<Result<String>>>,
    }

    impl ScriptedRunner {
        fn with(replies: Vec<Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
            })
        }
    }

    #[async_trait]
    impl QueryRunner for ScriptedRunner {
        async fn run(&self, _query: &str) -> Result<String> {
            self.replies.lock().unwrap().remove(0)
        }
    }

    /// Opener that records attempts and answers from a script
    struct RecordingOpener {
        opened: Mutex<Vec<std::path::PathBuf>>,
        fail_with: Option<String>,
    }

    impl RecordingOpener {
        fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                opened: Mutex::new(Vec::new()),
                fail_with: None,
            })
        }

        fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                opened: Mutex::new(Vec::new()),
                fail_with: Some(reason.to_string()),
            })
        }

        fn opened(&self) -> Vec<std::path::PathBuf> {
            self.opened.lock().unwrap().clone()
        }
    }

    impl FileOpener for RecordingOpener {
        fn open(&self, path: &Path) -> Result<()> {
            self.opened.lock().unwrap().push(path.to_path_buf());
            match &self.fail_with {
                None => Ok(()),
                Some(reason) => Err(SessionError::OpenFailure {
                    message: reason.clone(),
                }
                .into()),
            }
        }
    }

    fn session(runner: Arc<dyn QueryRunner>, opener: Arc<dyn FileOpener>) -> Session {
        Session::new(
            ResultInterpreter::new("/data"),
            PathResolver::new("/data", "/home/user/Documents"),
            runner,
            opener,
        )
    }

    fn lines(outcome: TurnOutcome) -> Vec<String> {
        match outcome {
            TurnOutcome::Continue(lines) => lines,
            TurnOutcome::Exit => panic!("unexpected exit"),
        }
    }

    #[tokio::test]
    async fn exit_ends_the_session() {
        let mut s = session(
            ScriptedRunner::with(vec![]),
            RecordingOpener::succeeding(),
        );
        assert_eq!(s.handle_line("quit").await, TurnOutcome::Exit);
    }

    #[tokio::test]
    async fn search_select_open_happy_path() {
        // Scenario A: the search produces two numbered results.
        let runner = ScriptedRunner::with(vec![Ok(
            "1: /data/reports/jan.pdf\n2: /data/reports/feb.pdf".to_string()
        )]);
        let opener = RecordingOpener::succeeding();
        let mut s = session(runner, opener.clone());

        let reply = lines(s.handle_line("search report").await);
        assert_eq!(reply[0], messages::FILES_FOUND);
        assert!(matches!(s.state(), SelectionState::ResultsPending(r) if r.len() == 2));

        // Scenario B: selecting 2 chooses feb.pdf.
        let reply = lines(s.handle_line("2").await);
        assert!(reply[0].contains(messages::TYPE_OPEN));
        assert!(reply[1].contains("/data/reports/feb.pdf"));

        // Scenario C: open resolves under the documents root and clears state.
        let reply = lines(s.handle_line("open").await);
        assert_eq!(reply, vec![messages::FILE_OPENED.to_string()]);
        assert_eq!(
            opener.opened(),
            vec![std::path::PathBuf::from(
                "/home/user/Documents/reports/feb.pdf"
            )]
        );
        assert_eq!(*s.state(), SelectionState::NoResults);
    }

    #[tokio::test]
    async fn out_of_range_selection_leaves_results_intact() {
        // Scenario D.
        let runner = ScriptedRunner::with(vec![Ok(
            "1: /data/reports/jan.pdf\n2: /data/reports/feb.pdf".to_string()
        )]);
        let mut s = session(runner, RecordingOpener::succeeding());

        lines(s.handle_line("search report").await);
        let reply = lines(s.handle_line("99").await);
        assert_eq!(reply, vec![messages::INVALID_NUMBER.to_string()]);
        assert!(matches!(s.state(), SelectionState::ResultsPending(r) if r.len() == 2));
    }

    #[tokio::test]
    async fn reply_without_marker_means_no_results() {
        // Scenario E.
        let runner =
            ScriptedRunner::with(vec![Ok("I could not find anything relevant.".to_string())]);
        let mut s = session(runner, RecordingOpener::succeeding());

        let reply = lines(s.handle_line("search nonexistent").await);
        assert_eq!(*s.state(), SelectionState::NoResults);
        assert!(reply.contains(&messages::NO_FILES.to_string()));
        assert!(reply.iter().any(|l| l.contains(messages::SEARCH_TIPS[0])));
    }

    #[tokio::test]
    async fn open_with_nothing_selected_reports() {
        let mut s = session(
            ScriptedRunner::with(vec![]),
            RecordingOpener::succeeding(),
        );
        let reply = lines(s.handle_line("open").await);
        assert_eq!(reply, vec![messages::NO_FILE_SELECTED.to_string()]);
    }

    #[tokio::test]
    async fn sole_result_opens_without_explicit_selection() {
        let runner = ScriptedRunner::with(vec![Ok(
            "File found:\n  - /data/reports/annual_report_2024.pdf\nType \"open\" to open this file"
                .to_string(),
        )]);
        let opener = RecordingOpener::succeeding();
        let mut s = session(runner, opener.clone());

        lines(s.handle_line("find the annual report").await);
        let reply = lines(s.handle_line("open").await);
        assert_eq!(reply, vec![messages::FILE_OPENED.to_string()]);
        assert_eq!(
            opener.opened(),
            vec![std::path::PathBuf::from(
                "/home/user/Documents/reports/annual_report_2024.pdf"
            )]
        );
    }

    #[tokio::test]
    async fn failed_open_preserves_selection_for_retry() {
        let runner = ScriptedRunner::with(vec![Ok(
            "1: /data/reports/jan.pdf\n2: /data/reports/feb.pdf".to_string()
        )]);
        let mut s = session(runner, RecordingOpener::failing("permission denied"));

        lines(s.handle_line("search report").await);
        lines(s.handle_line("1").await);
        let reply = lines(s.handle_line("open").await);
        assert!(reply[0].starts_with(messages::FILE_ERROR));
        assert!(matches!(s.state(), SelectionState::FileChosen { .. }));
    }

    #[tokio::test]
    async fn orchestration_error_is_reported_not_fatal() {
        let runner = ScriptedRunner::with(vec![
            Err(Error::Generic("model unavailable".to_string())),
            Ok("1: /data/reports/jan.pdf".to_string()),
        ]);
        let mut s = session(runner, RecordingOpener::succeeding());

        let reply = lines(s.handle_line("search report").await);
        assert!(reply[0].starts_with(messages::ERROR_OCCURRED));
        assert_eq!(*s.state(), SelectionState::NoResults);

        // The next turn works normally.
        lines(s.handle_line("search report").await);
        assert!(matches!(s.state(), SelectionState::ResultsPending(_)));
    }
}
