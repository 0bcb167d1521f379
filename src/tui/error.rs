use crate::database::DatabaseError;
use thiserror::Error;

/// Errors that abort the interactive session
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    /// A key binding in the config could not be parsed
    #[error("Key binding error: {0}")]
    KeyBindingError(String),
    #[error("Render error: {0}")]
    RenderError(String),
}
