//! Complaint service client
//!
//! [`ComplaintApi`] is the seam the view-model and front-ends depend on;
//! [`ComplaintClient`] implements it over HTTP.

pub mod errors;
pub mod http;

pub use errors::{ClientError, ErrorKind, DEFAULT_SUBMISSION_MESSAGE};
pub use http::ComplaintClient;

use async_trait::async_trait;

use crate::models::{ApiResult, Complaint, ComplaintDraft};

/// Operations offered by the remote complaint service.
#[async_trait]
pub trait ComplaintApi: Send + Sync {
    /// Fetch every stored complaint.
    async fn list_complaints(&self) -> Result<Vec<Complaint>, ClientError>;

    /// Store a new complaint. Empty fields are rejected before any request is made.
    ///
    /// `Ok` means the service accepted the complaint; `Success: false` is
    /// reported as [`ClientError::Rejected`].
    async fn submit_complaint(&self, draft: &ComplaintDraft) -> Result<ApiResult, ClientError>;
}
