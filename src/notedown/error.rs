use crate::names::NameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Note already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid note name {name:?}: {reason}")]
    InvalidName { name: String, reason: NameError },

    #[error("Unsaved changes in note: {0}")]
    UnsavedChanges(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl NoteError {
    pub fn invalid_name(name: &str, reason: NameError) -> Self {
        NoteError::InvalidName {
            name: name.to_string(),
            reason,
        }
    }

    /// Text a client shows in a warning dialog or status line.
    pub fn user_message(&self) -> String {
        match self {
            NoteError::AlreadyExists(_) => "Note already exists!".to_string(),
            NoteError::NotFound(name) => format!("Note \"{}\" could not be found.", name),
            NoteError::InvalidName { reason, .. } => {
                format!("Invalid note name: {}.", reason)
            }
            NoteError::UnsavedChanges(name) => format!(
                "Changes to \"{}\" could not be saved. Retry or discard them first.",
                name
            ),
            NoteError::Io(err) => format!("Could not access the note file: {}", err),
            NoteError::Serialization(err) => format!("Could not read settings: {}", err),
            NoteError::Api(msg) => msg.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteError>;
