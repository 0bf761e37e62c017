use crate::demo::{run_allocation, run_demo, AllocationRunArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hostel_ops::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Hostel Operations Service",
    about = "Run the hostel operations API and allocation tooling from the command line",
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
    /// Allocation batch tooling
    Allocation {
        #[command(subcommand)]
        command: AllocationCommand,
    },
    /// Run an end-to-end CLI demo covering allocation and complaints
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum AllocationCommand {
    /// Run the allocation batch against the standard campus and print the summary
    Run(AllocationRunArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Optional roster CSV to register students at startup
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Allocation {
            command: AllocationCommand::Run(args),
        } => run_allocation(args),
        Command::Demo(args) => run_demo(args),
    }
}
