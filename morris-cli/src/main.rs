//! Morris CLI - engine-vs-engine matches in the console
//!
//! Commands:
//! - play: run a full match between the max and min searchers
//! - eval: inspect the evaluation of a position

mod play;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "morris")]
#[command(about = "Six and Nine Men's Morris with alpha-beta search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full game between the two engine players
    Play(play::PlayArgs),
    /// Print the evaluation breakdown of a position
    Eval(play::EvalArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Eval(args) => play::run_eval(args),
    }
}
