//! Code-review command: send code (file or stdin) for an AI review.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use prepdeck_core::Settings;
use prepdeck_core::api::{self, ReviewRequest};

use crate::ui;

pub async fn run(
    file: Option<PathBuf>,
    comment: Option<String>,
    repo: Option<String>,
) -> Result<()> {
    let code = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            ui::info("Reading code from stdin (end with Ctrl-D)...");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };
    if code.trim().is_empty() {
        anyhow::bail!("No code to review");
    }

    let settings = Settings::load();
    let (client, _) = super::api_client(&settings)?;

    ui::info("Requesting review...");
    let review = api::request_review(&client, &ReviewRequest::new(code, comment, repo)).await?;

    ui::header("Review");
    println!("{}", review.review);
    if !review.questions.is_empty() {
        println!();
        println!("{}", style("Follow-up questions").bold().cyan());
        for (i, question) in review.questions.iter().enumerate() {
            println!("  {}. {question}", i + 1);
        }
    }
    Ok(())
}
