//! Error types for bead-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Bead core error: {0}")]
    Core(#[from] bead_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown file: {0}")]
    UnknownFile(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for bead_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Core(inner) => inner,
            Error::Io(inner) => bead_core::Error::Io(inner),
            other => bead_core::Error::InvalidInput(other.to_string()),
        }
    }
}
