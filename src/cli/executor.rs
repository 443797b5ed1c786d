//! Command executor for dispatching CLI commands

use super::handlers::{SendCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::AppResult;

/// Runs the parsed command. Without a subcommand the server starts.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Send {
            token,
            title,
            body,
            image,
            data,
        }) => {
            SendCommandHandler::new(
                settings,
                token.clone(),
                title.clone(),
                body.clone(),
                image.clone(),
                data.clone(),
            )
            .execute()
            .await
        }
    }
}
