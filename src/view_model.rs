//! Form/list view-model
//!
//! Holds the transient state behind the complaint form and list and decides
//! which request, if any, a user action should issue. The list and submit
//! operations each move through `Idle -> Loading -> Success | Error`
//! independently. At most one request of each kind is in flight.
//!
//! The `begin_*`/`complete_*` pairs are synchronous so an event loop can run
//! the request elsewhere and feed the result back. [`ViewModel::refresh`] and
//! [`ViewModel::submit`] drive the same transitions inline.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::client::{ClientError, ComplaintApi};
use crate::models::{ApiResult, Complaint, ComplaintDraft};

const DEFAULT_SUCCESS_MESSAGE: &str = "Complaint submitted";

/// Progress of one kind of request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestStatus::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// User-visible outcome of the most recent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Outcome of [`ViewModel::begin_submit`].
#[derive(Debug)]
pub enum SubmitStart {
    /// A submit is already pending; nothing was done.
    Ignored,
    /// The draft failed validation; no request should be made.
    Invalid(ClientError),
    /// Send this draft.
    Send(ComplaintDraft),
}

#[derive(Debug, Default)]
pub struct ViewModel {
    pub complaints: Vec<Complaint>,
    pub draft: ComplaintDraft,
    pub list_status: RequestStatus,
    pub submit_status: RequestStatus,
    pub notice: Option<Notice>,
    pub last_refreshed: Option<DateTime<Local>>,
    /// Set when a submit lands while a list fetch is already in flight.
    refresh_stale: bool,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading_list(&self) -> bool {
        self.list_status.is_loading()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_status.is_loading()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    /// Start a list fetch. Returns `false` when one is already in flight.
    pub fn begin_refresh(&mut self) -> bool {
        if self.is_loading_list() {
            debug!("List refresh ignored: fetch already in flight");
            return false;
        }
        self.list_status = RequestStatus::Loading;
        true
    }

    /// Apply a list fetch result. Returns `true` when a follow-up fetch has
    /// been started and should be issued.
    pub fn complete_refresh(&mut self, result: Result<Vec<Complaint>, ClientError>) -> bool {
        match result {
            Ok(complaints) => {
                info!("Loaded {} complaints", complaints.len());
                self.complaints = complaints;
                self.list_status = RequestStatus::Success;
                self.last_refreshed = Some(Local::now());
                if matches!(&self.notice, Some(n) if n.kind == NoticeKind::Error) {
                    self.notice = None;
                }
            }
            Err(e) => {
                warn!("Loading complaints failed: {}", e);
                let message = e.to_string();
                self.list_status = RequestStatus::Error(message.clone());
                self.notice = Some(Notice::error(message));
            }
        }

        if std::mem::take(&mut self.refresh_stale) {
            debug!("Refetching complaints: result predates a saved complaint");
            self.list_status = RequestStatus::Loading;
            return true;
        }
        false
    }

    /// Start a submit of the current draft.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_submitting() {
            debug!("Submit ignored: previous submission still pending");
            return SubmitStart::Ignored;
        }

        if let Some(field) = self.draft.missing_field() {
            let err = ClientError::Validation(field);
            let message = err.to_string();
            self.submit_status = RequestStatus::Error(message.clone());
            self.notice = Some(Notice::error(message));
            return SubmitStart::Invalid(err);
        }

        self.submit_status = RequestStatus::Loading;
        SubmitStart::Send(self.draft.clone())
    }

    /// Apply a submit result. Returns `true` when a list fetch has been
    /// started and should be issued.
    pub fn complete_submit(&mut self, result: &Result<ApiResult, ClientError>) -> bool {
        match result {
            Ok(ack) if !ack.success => {
                self.fail_submit(&ClientError::rejected(ack.message.clone()));
                false
            }
            Ok(ack) => {
                self.submit_status = RequestStatus::Success;
                self.draft.clear();
                let text = ack
                    .message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
                self.notice = Some(Notice::success(text));

                if self.begin_refresh() {
                    true
                } else {
                    self.refresh_stale = true;
                    false
                }
            }
            Err(e) => {
                self.fail_submit(e);
                false
            }
        }
    }

    fn fail_submit(&mut self, e: &ClientError) {
        warn!("Submitting complaint failed: {}", e);
        let message = e.to_string();
        self.submit_status = RequestStatus::Error(message.clone());
        self.notice = Some(Notice::error(message));
    }

    /// Fetch the list inline, including any follow-up fetch.
    pub async fn refresh<A>(&mut self, api: &A)
    where
        A: ComplaintApi + ?Sized,
    {
        if !self.begin_refresh() {
            return;
        }
        self.fetch_until_current(api).await;
    }

    /// Submit the draft inline and refresh the list on success.
    ///
    /// Returns the error when the draft was invalid or the service refused
    /// it. `Ok(())` is also returned when the call was ignored because a
    /// submit is already pending.
    pub async fn submit<A>(&mut self, api: &A) -> Result<(), ClientError>
    where
        A: ComplaintApi + ?Sized,
    {
        let draft = match self.begin_submit() {
            SubmitStart::Ignored => return Ok(()),
            SubmitStart::Invalid(err) => return Err(err),
            SubmitStart::Send(draft) => draft,
        };

        let result = api.submit_complaint(&draft).await.and_then(|ack| {
            if ack.success {
                Ok(ack)
            } else {
                Err(ClientError::rejected(ack.message))
            }
        });
        if self.complete_submit(&result) {
            self.fetch_until_current(api).await;
        }
        result.map(|_| ())
    }

    async fn fetch_until_current<A>(&mut self, api: &A)
    where
        A: ComplaintApi + ?Sized,
    {
        loop {
            let result = api.list_complaints().await;
            if !self.complete_refresh(result) {
                break;
            }
        }
    }
}
