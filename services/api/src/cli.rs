use crate::demo::{run_demo, run_export, run_stats_report, DemoArgs, ExportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use club_registry::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Club Registry",
    about = "Run and inspect the club membership registry from the command line",
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
    /// Walk the registration pipeline against a seeded in-memory store
    Demo(DemoArgs),
    /// Inspect the persisted registry
    Stats {
        #[command(subcommand)]
        command: StatsCommand,
    },
    /// Export a registry collection as a CSV file
    Export(ExportArgs),
}

#[derive(Subcommand, Debug)]
enum StatsCommand {
    /// Print the statistics snapshot for the configured data directory
    Report,
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
        Command::Demo(args) => run_demo(args),
        Command::Stats {
            command: StatsCommand::Report,
        } => run_stats_report(),
        Command::Export(args) => run_export(args),
    }
}
