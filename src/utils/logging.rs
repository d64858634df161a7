use crate::utils::{config::RuntimeConfig, error::ConfigError};

/// Install the global fmt subscriber at the configured level.
pub fn init_logging(config: &RuntimeConfig) -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .try_init()
        .map_err(|e| ConfigError::LoggingInit(e.to_string()))
}
