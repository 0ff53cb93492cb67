//! Error types for the complaint service client

use thiserror::Error;

use crate::models::DraftField;

/// Default text shown when the service rejects a complaint without a message.
pub const DEFAULT_SUBMISSION_MESSAGE: &str = "The complaint could not be saved";

/// Broad category of a [`ClientError`], used by the view-model and front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Submission,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0} must not be empty")]
    Validation(DraftField),

    #[error("Complaint service returned status {status} while listing complaints")]
    ListStatus { status: u16 },

    #[error("Failed to load complaints: {0}")]
    ListTransport(#[source] reqwest::Error),

    #[error("{message}")]
    Rejected { message: String },

    #[error("Complaint service returned status {status} while saving")]
    SubmitStatus { status: u16 },

    #[error("Failed to submit complaint: {0}")]
    SubmitTransport(#[source] reqwest::Error),
}

impl ClientError {
    /// Rejection built from the server's message, or the default text when
    /// it sent none.
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBMISSION_MESSAGE.to_string());
        ClientError::Rejected { message }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::ListStatus { .. } | ClientError::ListTransport(_) => ErrorKind::Network,
            ClientError::Rejected { .. }
            | ClientError::SubmitStatus { .. }
            | ClientError::SubmitTransport(_) => ErrorKind::Submission,
        }
    }
}
