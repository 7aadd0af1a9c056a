use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required element-typed option did not refer to an element.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
