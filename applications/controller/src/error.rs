/// Controller error types
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ControllerError>;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to access {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {field} in {}: {value:?}", path.display())]
    InvalidSetting {
        path: PathBuf,
        field: &'static str,
        value: String,
    },
}
