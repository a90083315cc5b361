use thiserror::Error;

pub type PopupResult<T> = Result<T, PopupError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PopupError {
    #[error("Can't get term for non-vocab property '{property}'")]
    InvalidPropertyKind { property: String },

    #[error("Invalid vocab property value for '{property}': {value}")]
    InvalidPropertyValue { property: String, value: String },

    // --- configuration loading ---

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },
}

impl From<serde_yaml::Error> for PopupError {
    fn from(err: serde_yaml::Error) -> Self {
        PopupError::Yaml(err.to_string())
    }
}
