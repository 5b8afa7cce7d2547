//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prepdeck_core::api::{Difficulty, Language};

#[derive(Parser)]
#[command(
    name = "prepdeck",
    about = "Terminal client for an AI interview-practice backend",
    version
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a random coding problem and submit a solution for grading
    Coding {
        /// Problem difficulty (easy, medium, hard); random when omitted
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Solution file to submit after the problem is shown
        #[arg(long)]
        file: Option<PathBuf>,

        /// Submission language
        #[arg(long, default_value = "python")]
        language: Language,

        /// Only show the problem, skip the submission prompt
        #[arg(long)]
        no_submit: bool,
    },

    /// Ask the AI for a code review
    Review {
        /// File to review (reads stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Extra context or a question for the reviewer
        #[arg(long)]
        comment: Option<String>,

        /// Repository URL to review the code in context of
        #[arg(long)]
        repo: Option<String>,
    },

    /// Run a voice interview based on a GitHub repository
    Interview {
        /// Repository URL the questions are generated from
        #[arg(long)]
        repo: String,
    },

    /// Log in through the backend's GitHub OAuth flow
    Login,

    /// Clear stored credentials
    Logout,

    /// Show or change client settings
    Config {
        /// Backend API base URL
        #[arg(long)]
        backend_url: Option<String>,

        /// Microphone device name (see --list-microphones)
        #[arg(long)]
        microphone: Option<String>,

        /// Seconds of prep time before each interview answer
        #[arg(long)]
        prep_seconds: Option<u32>,

        /// Per-answer time budget in seconds
        #[arg(long)]
        answer_seconds: Option<u32>,

        /// List available microphone devices
        #[arg(long)]
        list_microphones: bool,
    },
}
