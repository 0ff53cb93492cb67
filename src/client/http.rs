//! reqwest implementation of [`ComplaintApi`]

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::{ClientError, ComplaintApi};
use crate::config::Config;
use crate::models::{ApiResult, Complaint, ComplaintDraft};

const LIST_ENDPOINT: &str = "TestApi/GetComplains";
const SAVE_ENDPOINT: &str = "TestApi/SaveComplain";

/// HTTP client for the complaint service.
#[derive(Debug, Clone)]
pub struct ComplaintClient {
    client: Client,
    base_url: String,
}

impl ComplaintClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ComplaintApi for ComplaintClient {
    async fn list_complaints(&self) -> Result<Vec<Complaint>, ClientError> {
        let url = self.endpoint(LIST_ENDPOINT);
        debug!("Fetching complaints from: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::ListTransport)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Complaint list request failed with status {}", status);
            return Err(ClientError::ListStatus {
                status: status.as_u16(),
            });
        }

        let complaints: Vec<Complaint> =
            response.json().await.map_err(ClientError::ListTransport)?;
        info!("Fetched {} complaints", complaints.len());
        Ok(complaints)
    }

    async fn submit_complaint(&self, draft: &ComplaintDraft) -> Result<ApiResult, ClientError> {
        if let Some(field) = draft.missing_field() {
            return Err(ClientError::Validation(field));
        }

        let url = self.endpoint(SAVE_ENDPOINT);
        let payload = draft.trimmed();
        debug!("Submitting complaint '{}' to: {}", payload.title, url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(ClientError::SubmitTransport)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Complaint submission failed with status {}", status);
            return Err(ClientError::SubmitStatus {
                status: status.as_u16(),
            });
        }

        let ack: ApiResult = response.json().await.map_err(ClientError::SubmitTransport)?;
        if !ack.success {
            warn!(
                "Complaint rejected by service: {}",
                ack.message.as_deref().unwrap_or("no message")
            );
            return Err(ClientError::rejected(ack.message));
        }

        info!("Complaint '{}' saved", payload.title);
        Ok(ack)
    }
}
