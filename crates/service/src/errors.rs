use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// The backing file could not be read or parsed at startup.
    #[error("cannot load {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("storage error: {0}")]
    Storage(String),
    /// The remote glossary service could not be reached or answered garbage.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn required(field: &str) -> Self { Self::Validation(format!("{} is required", field)) }

    /// Message without the variant prefix, as shown to RPC callers.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(m) | Self::NotFound(m) | Self::Storage(m) | Self::Unavailable(m) => m.clone(),
            Self::Load { .. } => self.to_string(),
        }
    }
}
