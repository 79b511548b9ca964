use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("'{0}' is not a valid token")]
    invalid_token(String),

    #[error("identifier, '{0}', is not defined")]
    unknown_variable(String),

    #[error("empty expression")]
    empty_expression,

    #[error("an operator is missing an operand")]
    invalid_expression,

    #[error("division by zero")]
    division_by_zero,

    #[error("'{0}' is not a valid identifier")]
    invalid_identifier(String),

    #[error("{}: {}", .path.display(), .source)]
    io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CalcError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io{path: path.into(), source}
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
