use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Ingredient pool '{0}' is empty")]
    EmptyPool(&'static str),
    #[error("Failed to load pool file {path}: {reason}")]
    PoolFile { path: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Primary image service failed: {0}")]
    ImagePrimaryFailure(String),
    #[error("Could not load an image for this dish: {0}")]
    ImageTotalFailure(String),
    #[error("Cannot {event} while {from}")]
    InvalidTransition { from: String, event: &'static str },
}

pub type FusionResult<T> = Result<T, FusionError>;
