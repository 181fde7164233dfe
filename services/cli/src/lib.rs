mod cli;
mod commands;
mod infra;

use rotation_grade::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
