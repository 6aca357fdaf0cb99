//! Error taxonomy for a regression hunt
//!
//! Every error is fatal for the hunt that raised it. Zero-variance input to the
//! significance test is not an error: it is reported as "not significant".

use thiserror::Error;

/// Boxed error produced by a sampling collaborator
pub type BoxedSourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a hunt
#[derive(Error, Debug)]
pub enum HuntError {
    #[error("need at least 2 revisions, got {count}")]
    InsufficientInput { count: usize },

    #[error("sampling revision {revision} failed: {source}")]
    SamplerFailure {
        revision: String,
        #[source]
        source: BoxedSourceError,
    },

    #[error("invalid samples for revision {revision}: {reason}")]
    InvalidSamples { revision: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HuntError {
    /// Revision the error is attributed to, if any
    pub fn revision(&self) -> Option<&str> {
        match self {
            HuntError::SamplerFailure { revision, .. }
            | HuntError::InvalidSamples { revision, .. } => Some(revision),
            HuntError::InsufficientInput { .. } | HuntError::InvalidConfig(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HuntError>;
