use thiserror::Error;
use tsp_solvers::SolveError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Clap(#[from] clap::Error),

    #[error("{0}")]
    Args(String),

    #[error(transparent)]
    Parse(#[from] tsp_parser::ParserError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
