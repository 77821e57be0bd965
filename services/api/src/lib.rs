mod cli;
mod infra;
mod report;
mod routes;
mod server;

use campaign_roaster::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
