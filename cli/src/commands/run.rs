//! Single-query command

use super::interactive::build_session;
use crate::config::CliConfigLoader;
use anyhow::Result;
use finda_core::TurnOutcome;

/// Run one query through a fresh session and print the reply
pub async fn run_command(query: String, config_loader: CliConfigLoader) -> Result<()> {
    let config = config_loader.load().await?;
    let mut session = build_session(&config)?;

    match session.handle_line(&query).await {
        TurnOutcome::Exit => {}
        TurnOutcome::Continue(reply) => {
            for line in reply {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
