mod args;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use crate::args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    prepdeck_core::set_verbose(cli.verbose);

    match cli.command {
        Commands::Coding {
            difficulty,
            file,
            language,
            no_submit,
        } => commands::coding::run(difficulty, file, language, no_submit).await,
        Commands::Review {
            file,
            comment,
            repo,
        } => commands::review::run(file, comment, repo).await,
        Commands::Interview { repo } => commands::interview::run(&repo).await,
        Commands::Login => commands::login::run(),
        Commands::Logout => commands::login::logout(),
        Commands::Config {
            backend_url,
            microphone,
            prep_seconds,
            answer_seconds,
            list_microphones,
        } => commands::config::run(
            backend_url,
            microphone,
            prep_seconds,
            answer_seconds,
            list_microphones,
        ),
    }
}
