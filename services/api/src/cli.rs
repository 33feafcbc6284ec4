use crate::assess::{run_assess, run_draws, run_programs, AssessArgs, DrawsArgs, ReferenceArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use crs_pathways::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "CRS Pathways",
    about = "Estimate Express Entry CRS scores and match them to provincial pathways",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a profile and print ranked pathways with next steps
    Assess(AssessArgs),
    /// List active provincial programs and their CRS cutoffs
    Programs(ReferenceArgs),
    /// List recent Express Entry draws
    Draws(DrawsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve reference tables from CSV exports in this directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Programs(args) => run_programs(args),
        Command::Draws(args) => run_draws(args),
    }
}
