//! Daybrief - Business Messages calendar assistant
//!
//! `daybrief serve` runs the webhook server; the other subcommands are
//! operator tools sharing the same configuration and database.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use daybrief_domain::{Config, Result};
use daybrief_infra::config::{load as load_config, load_without_credentials};
use daybrief_infra::SqliteFeedbackRepository;
use daybrief_lib::commands::{add_feedback, list_unreviewed_feedback, review_feedback, send_message};
use daybrief_lib::context::open_database;
use daybrief_lib::server;
use daybrief_lib::utils::logging::{error_label, init_tracing};
use daybrief_lib::AppContext;
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(name = "daybrief", version, about = "Business Messages calendar assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the webhook server
    Serve,
    /// Route a message for an existing conversation as if the user sent it
    SendMessage { conversation_id: String, message: String },
    /// Manage operator feedback
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },
}

#[derive(Debug, Subcommand)]
enum FeedbackAction {
    /// Record a feedback entry
    Add { text: String },
    /// Show feedback nobody has reviewed yet
    List,
    /// Mark an entry as reviewed
    Review { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // Feedback commands only touch the local database.
    let config = match cli.command {
        Command::Feedback { .. } => load_without_credentials(),
        _ => load_config(),
    }
    .context("failed to load configuration")?;
    init_tracing(&config.logging);
    match dotenv {
        Ok(path) => info!(path = %path.display(), "dotenv_loaded"),
        Err(err) => debug!(error = %err, "dotenv_not_loaded"),
    }

    if let Err(err) = run(cli.command, config).await {
        error!(kind = error_label(&err), error = %err, "command_failed");
        return Err(err.into());
    }
    Ok(())
}

async fn run(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Serve => {
            let context = Arc::new(AppContext::new(config).await?);
            server::serve(context).await
        }
        Command::SendMessage { conversation_id, message } => {
            let context = AppContext::new(config).await?;
            let outcome = send_message(&context, &conversation_id, &message).await?;
            info!(outcome = outcome.label(), "send_message_finished");
            Ok(())
        }
        Command::Feedback { action } => {
            let feedback = SqliteFeedbackRepository::new(open_database(&config)?);
            run_feedback(&feedback, action).await
        }
    }
}

#[allow(clippy::print_stdout)]
async fn run_feedback(feedback: &SqliteFeedbackRepository, action: FeedbackAction) -> Result<()> {
    match action {
        FeedbackAction::Add { text } => {
            let created = add_feedback(feedback, &text).await?;
            println!("{}", created.id);
        }
        FeedbackAction::List => {
            for entry in list_unreviewed_feedback(feedback).await? {
                println!("{}\t{}", entry.id, entry.text);
            }
        }
        FeedbackAction::Review { id } => review_feedback(feedback, id).await?,
    }
    Ok(())
}
