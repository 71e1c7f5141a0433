mod cli;
mod infra;
mod routes;
mod server;
mod wizard;

use application_form::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
