use thiserror::Error;

use crate::config::ConfigError;
use crate::parser::ParseError;
use crate::schema::SchemaError;

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure of the parse-and-emit pipeline; none is recoverable
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
