use crate::commands::{run_diagnose, run_preview_email, DiagnoseArgs, PreviewEmailArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use portfolio_diagnosis::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Portfolio Diagnosis",
    about = "Run the portfolio diagnosis quiz service or try it from the command line",
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
    /// Diagnose a portfolio given as yen amounts
    Diagnose(DiagnoseArgs),
    /// Render the result e-mails for a portfolio and optionally send them
    PreviewEmail(PreviewEmailArgs),
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
        Command::Diagnose(args) => run_diagnose(args),
        Command::PreviewEmail(args) => run_preview_email(args).await,
    }
}
