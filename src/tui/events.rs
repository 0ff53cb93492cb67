//! Event handling for the complaint TUI

use crate::client::ClientError;
use crate::models::{ApiResult, Complaint};

/// Completions delivered from request tasks back to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    /// List fetch finished
    ComplaintsLoaded(Result<Vec<Complaint>, ClientError>),
    /// Submit finished
    ComplaintSubmitted(Result<ApiResult, ClientError>),
}
