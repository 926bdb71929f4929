mod cli;
mod decisions;
mod evaluate;
mod infra;
mod routes;
mod server;

use upgrade_engine::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
