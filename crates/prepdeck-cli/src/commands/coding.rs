//! Coding-test command: fetch a problem, submit a solution, render grading.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use prepdeck_core::Settings;
use prepdeck_core::api::{
    self, CodingProblem, Difficulty, Language, SubmissionRequest, SubmissionResult,
};

use crate::ui;

pub async fn run(
    difficulty: Option<Difficulty>,
    file: Option<PathBuf>,
    language: Language,
    no_submit: bool,
) -> Result<()> {
    let settings = Settings::load();
    let (client, auth) = super::api_client(&settings)?;

    let problem = api::fetch_random_problem(&client, difficulty).await?;
    render_problem(&problem);

    if no_submit {
        return Ok(());
    }

    let path = match file {
        Some(path) => path,
        None => {
            println!();
            if !ui::confirm("Submit a solution now?", true)? {
                println!(
                    "A {} starter template:\n\n{}",
                    language,
                    language.starter_template()
                );
                return Ok(());
            }
            PathBuf::from(ui::input("Solution file", None)?)
        }
    };

    let source_code = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let user_id = auth.username().unwrap_or("guest").to_string();

    println!();
    ui::info("Grading against the full test-case set...");
    let result = api::submit_code(
        &client,
        &SubmissionRequest {
            problem_id: problem.id,
            source_code,
            language,
            user_id,
        },
    )
    .await?;
    render_result(&result);
    Ok(())
}

fn render_problem(problem: &CodingProblem) {
    ui::header(&format!("{} [{}]", problem.title, problem.difficulty));
    if !problem.tags.is_empty() {
        println!("{}", style(problem.tags.join(", ")).dim());
        println!();
    }
    println!("{}", problem.description);
    for (i, sample) in problem.samples.iter().enumerate() {
        println!();
        println!("{}", style(format!("Sample {}", i + 1)).bold());
        println!("  input:    {}", sample.input_data);
        println!("  expected: {}", sample.expected_output);
    }
}

fn render_result(result: &SubmissionResult) {
    println!();
    println!("{} {}", style("Status:").bold(), result.status);
    if let Some(score) = result.score {
        println!("{} {score}", style("Score:").bold());
    }
    println!(
        "{} {}/{}",
        style("Passed:").bold(),
        result.passed_count,
        result.total_count
    );
    if let Some(message) = &result.message {
        println!("{} {message}", style("Message:").bold());
    }
    if let Some(feedback) = &result.ai_feedback {
        println!();
        println!("{}", style("AI feedback").bold().cyan());
        println!("{feedback}");
    }
}
