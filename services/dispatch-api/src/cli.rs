use crate::dispatch::{run_dispatch, DispatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use evidence_dispatch::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Evidence Bulk Print Dispatcher",
    about = "Send eligible case evidence to bulk print and record the outcome on the case",
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
    /// Run a single case event through in-memory collaborators and print the report
    Dispatch(DispatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dispatch(args) => run_dispatch(args),
    }
}
