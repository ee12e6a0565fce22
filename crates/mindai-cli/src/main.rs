use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mindai_core::solution::{RefinementKind, VoteDirection};

mod commands;
mod console;
mod context;

use context::AppContext;

#[derive(Parser)]
#[command(name = "mindai")]
#[command(about = "MindAI - review, refine and save AI-generated solutions", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a solution snapshot (JSON) as the current solution
    Load { file: PathBuf },
    /// Display the current solution
    Show,
    /// Request a refined solution
    Refine {
        /// refine, alternative, simpler, practical or deeper
        kind: RefinementKind,
    },
    /// Vote on the current solution
    Vote {
        /// up or down
        direction: VoteDirection,
    },
    /// Save the current solution and plan
    Save,
    /// End the session and clear the stored solution
    End,
    /// Print this client's session identity
    Whoami,
    /// Start an interactive session
    Repl,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = context::load_config(cli.config)?;
    context::init_tracing(&config.logging.level);
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Load { file } => commands::load::run(&ctx, &file).await,
        Commands::Show => commands::solution::show(&ctx).await,
        Commands::Refine { kind } => commands::solution::refine(&ctx, kind).await,
        Commands::Vote { direction } => commands::solution::vote(&ctx, direction).await,
        Commands::Save => commands::solution::save(&ctx).await,
        Commands::End => commands::solution::end(&ctx).await,
        Commands::Whoami => commands::identity::whoami(&ctx).await,
        Commands::Repl => commands::repl::run(&ctx).await,
    }
}
