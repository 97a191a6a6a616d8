mod ai;
mod app;
mod board;
mod interview;
mod models;
mod render;
mod resume;
mod tui;

use anyhow::Result;
use clap::Parser;

use ai::{Gateway, DEFAULT_DEEP_MODEL, DEFAULT_FAST_MODEL};

#[derive(Parser)]
#[command(name = "careerdesk")]
#[command(about = "Resume editor, application tracker, and AI interview practice in the terminal")]
struct Cli {
    /// Model for summaries, rewrites, and interview chat
    #[arg(long, default_value = DEFAULT_FAST_MODEL)]
    model: String,

    /// Model for resume-to-job match analysis
    #[arg(long, default_value = DEFAULT_DEEP_MODEL)]
    analysis_model: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // A missing key degrades the AI features instead of blocking startup.
    let gateway = Gateway::from_env(cli.model, cli.analysis_model);
    tui::run(gateway)
}
