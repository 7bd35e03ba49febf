//! Interactive session command

use crate::config::{AppConfig, CliConfigLoader};
use crate::opener::SystemOpener;
use anyhow::Result;
use colored::Colorize;
use finda_core::agent::Orchestrator;
use finda_core::llm::OpenAiCompatClient;
use finda_core::session::messages;
use finda_core::transcript::{TranscriptEntry, TranscriptRecorder};
use finda_core::{PathResolver, ResourceClient, ResultInterpreter, Session, TurnOutcome};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use uuid::Uuid;

/// Build a session from resolved configuration
pub(crate) fn build_session(config: &AppConfig) -> Result<Session> {
    let llm = Arc::new(OpenAiCompatClient::new(&config.llm)?);
    let resources = Arc::new(ResourceClient::new(
        &config.search.endpoint,
        &config.search.virtual_root,
        config.search.timeout_seconds,
    )?);

    let orchestrator = Arc::new(Orchestrator::new(llm, resources));
    let interpreter = ResultInterpreter::new(&config.search.virtual_root);
    let resolver = PathResolver::new(&config.search.virtual_root, &config.search.documents_root);

    Ok(Session::new(
        interpreter,
        resolver,
        orchestrator,
        Arc::new(SystemOpener),
    ))
}

/// Record one transcript entry; failures are logged, never fatal
async fn record(recorder: &Option<TranscriptRecorder>, entry: TranscriptEntry) {
    if let Some(recorder) = recorder {
        if let Err(e) = recorder.record(entry).await {
            warn!("failed to record transcript entry: {}", e);
        }
    }
}

/// Run the interactive session loop
pub async fn interactive_command(
    config_loader: CliConfigLoader,
    transcript_file: Option<PathBuf>,
) -> Result<()> {
    let config = config_loader.load().await?;
    let mut session = build_session(&config)?;

    let session_id = Uuid::new_v4().to_string();
    let recorder =
        transcript_file.map(|path| TranscriptRecorder::with_file(session_id.clone(), path));

    println!("{} {}", "Session:".dimmed(), session_id.dimmed());
    println!("{}", messages::welcome().cyan());
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", "Input>".green());
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        record(&recorder, TranscriptEntry::user(line)).await;

        match session.handle_line(line).await {
            TurnOutcome::Exit => break,
            TurnOutcome::Continue(reply) => {
                for reply_line in &reply {
                    println!("{} {}", "System>".blue(), reply_line);
                }
                println!();
                record(&recorder, TranscriptEntry::system(reply.join("\n"))).await;
            }
        }
    }

    println!("{}", "Goodbye!".cyan());
    Ok(())
}
