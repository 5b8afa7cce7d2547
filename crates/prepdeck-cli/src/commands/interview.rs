//! Voice interview command: drives the session runner in the terminal.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use console::style;
use prepdeck_core::{
    InterviewSession, Phase, SessionObserver, SessionOptions, Settings, UserIntent, run_session,
};
use tokio::sync::mpsc;

use crate::ui;

/// Renders phase changes as single status lines, redrawing countdowns in
/// place. Terminal phases are handled by the caller.
struct TerminalObserver {
    last_line: String,
}

impl TerminalObserver {
    fn new() -> Self {
        Self {
            last_line: String::new(),
        }
    }

    fn draw(&mut self, line: String) {
        if line == self.last_line {
            return;
        }
        // Pad over the remains of the previous line.
        print!("\r{line:<70}");
        let _ = std::io::stdout().flush();
        self.last_line = line;
    }

    fn draw_block(&mut self, text: &str) {
        if text == self.last_line {
            return;
        }
        println!();
        println!("{text}");
        self.last_line = text.to_string();
    }
}

impl SessionObserver for TerminalObserver {
    fn phase_changed(&mut self, session: &InterviewSession) {
        match session.phase() {
            Phase::Loading => self.draw_block(
                "Analyzing the repository and generating questions (this can take a few seconds)...",
            ),
            Phase::Prep { remaining } => {
                let position = format!(
                    "Q {}/{}",
                    session.current_index() + 1,
                    session.total_questions()
                );
                if let Some(question) = session.current_question() {
                    let header = format!(
                        "{} {}\n{}",
                        style(&position).bold().cyan(),
                        style(format!("[{}]", question.kind.as_str())).dim(),
                        question.text
                    );
                    self.draw_block(&header);
                }
                self.draw(format!("  recording starts in {remaining}s..."));
            }
            Phase::Answer { stopping: None } => {
                self.draw(format!(
                    "  {} press Enter for the next question",
                    style("● recording —").red()
                ));
            }
            Phase::Answer { stopping: Some(_) } => {
                self.draw("  transcribing your answer...".to_string());
            }
            Phase::Analyzing => {
                println!();
                self.draw_block("Analyzing your answers, putting the feedback together...");
            }
            // Final outcome is rendered by run() from the runner's result.
            Phase::Error { .. } | Phase::Done { .. } => {}
        }
    }

    fn answer_tick(&mut self, remaining: u32) {
        self.draw(format!(
            "  {} {remaining:>2}s left — press Enter for the next question",
            style("● recording").red()
        ));
    }
}

pub async fn run(repo: &str) -> Result<()> {
    let settings = Settings::load();
    let (client, _) = super::api_client(&settings)?;
    let options = SessionOptions::from_settings(&settings);

    // Enter on stdin advances to the next question.
    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            if line.is_err() || intent_tx.send(UserIntent::NextQuestion).is_err() {
                break;
            }
        }
    });

    let mut observer = TerminalObserver::new();
    match run_session(Arc::new(client), repo, options, intent_rx, &mut observer).await {
        Ok(feedback) => {
            ui::header("Interview result");
            println!(
                "{} {} / 100",
                style("Overall score:").bold(),
                feedback.overall_score
            );
            println!();
            println!("{}", feedback.summary);
            Ok(())
        }
        Err(err) => {
            println!();
            ui::error(&err.to_string());
            ui::info("Run `prepdeck interview` again to retry.");
            std::process::exit(1);
        }
    }
}
