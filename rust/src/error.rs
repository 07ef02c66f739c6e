use std::error::Error;
use std::io;
use thiserror::Error;

/// Error produced upstream while tokenising or parsing, passed through untouched.
pub type SyntaxError = Box<dyn Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum MinifyError {
  #[error(transparent)]
  Syntax(SyntaxError),
  #[error("IO error: {0}")]
  Io(#[from] io::Error),
}

pub type MinifyResult<T> = Result<T, MinifyError>;
