//! Shared test doubles

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use complaint_desk::{ApiResult, ClientError, Complaint, ComplaintApi, ComplaintDraft};

/// In-memory complaint service that counts calls
pub struct FakeApi {
    complaints: Mutex<Vec<Complaint>>,
    next_id: AtomicI64,
    list_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    list_failure: Mutex<Option<u16>>,
    rejection: Mutex<Option<Option<String>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::with_complaints(Vec::new())
    }

    pub fn with_complaints(complaints: Vec<Complaint>) -> Self {
        let next_id = complaints.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            complaints: Mutex::new(complaints),
            next_id: AtomicI64::new(next_id),
            list_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            list_failure: Mutex::new(None),
            rejection: Mutex::new(None),
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Make list calls answer with this HTTP status until cleared
    pub fn fail_list_with(&self, status: Option<u16>) {
        *self.list_failure.lock().unwrap() = status;
    }

    /// Make submit calls answer `Success: false` with this message
    pub fn reject_with(&self, message: Option<&str>) {
        *self.rejection.lock().unwrap() = Some(message.map(str::to_string));
    }
}

pub fn complaint(id: i64, title: &str, body: &str) -> Complaint {
    Complaint {
        id,
        title: title.to_string(),
        body: body.to_string(),
        created_at: Some("2024-05-01T10:30:00Z".to_string()),
    }
}

#[async_trait]
impl ComplaintApi for FakeApi {
    async fn list_complaints(&self) -> Result<Vec<Complaint>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = *self.list_failure.lock().unwrap() {
            return Err(ClientError::ListStatus { status });
        }
        Ok(self.complaints.lock().unwrap().clone())
    }

    async fn submit_complaint(&self, draft: &ComplaintDraft) -> Result<ApiResult, ClientError> {
        if let Some(field) = draft.missing_field() {
            return Err(ClientError::Validation(field));
        }
        self.submit_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.rejection.lock().unwrap().clone() {
            return Err(ClientError::rejected(message));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let draft = draft.trimmed();
        self.complaints
            .lock()
            .unwrap()
            .push(complaint(id, &draft.title, &draft.body));
        Ok(ApiResult {
            success: true,
            message: Some("Complaint saved".to_string()),
        })
    }
}
