mod cli;
mod dispatch;
mod infra;
mod routes;
mod server;

use evidence_dispatch::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
