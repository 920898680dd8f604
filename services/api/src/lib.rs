mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use portfolio_diagnosis::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
