use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("Attempted to change the tensor rank which is immutable: old={old}, new={new}")]
    RankMismatch { old: usize, new: usize },

    #[error("Unsupported resize: {0}")]
    UnsupportedResize(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid log level '{value}' for {name}")]
    InvalidLogLevel { name: &'static str, value: String },

    #[error("logging already initialised: {0}")]
    LoggingInit(String),
}
