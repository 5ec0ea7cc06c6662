use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use shared_types::{
    Answer, AnswersResponse, ApiReply, SubmitResponseRequest, SubmitResponseResponse,
    ACTION_GET_ANSWERS,
};
use tracing::{debug, error, warn};

use crate::{config::ClientConfig, error::ClientError, mock::mock_answers, source::AnswerSource};

/// HTTP client for the allocation endpoint
pub struct AllocationClient {
    endpoint: Option<String>,
    mock_fallback: bool,
    http_client: reqwest::Client,
}

impl AllocationClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            endpoint: config.configured_endpoint().map(str::to_string),
            mock_fallback: config.mock_fallback,
            http_client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Lists the claimable answers without any fallback
    pub async fn get_answers(&self, endpoint: &str) -> Result<Vec<Answer>, ClientError> {
        let response = self
            .http_client
            .get(endpoint)
            .headers(Self::headers())
            .query(&[("action", ACTION_GET_ANSWERS)])
            .send()
            .await?;

        let reply: AnswersResponse = read_reply(response).await?;
        Ok(reply.answers)
    }

    /// Sends one claim stamped with the local clock
    pub async fn post_submission(
        &self,
        endpoint: &str,
        name: &str,
        selected_answer_id: &str,
    ) -> Result<(), ClientError> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let request = SubmitResponseRequest::new(name, selected_answer_id, Some(timestamp));

        let response = self
            .http_client
            .post(endpoint)
            .headers(Self::headers())
            .json(&request)
            .send()
            .await?;

        let reply: SubmitResponseResponse = read_reply(response).await?;
        if reply.success {
            Ok(())
        } else {
            Err(ClientError::Rejected)
        }
    }
}

/// Decodes an allocation payload regardless of status code. Bodies that are
/// neither a result nor an `{ error }` count as transport failures.
async fn read_reply<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<ApiReply<T>>(&body) {
        Ok(reply) => reply.into_result().map_err(ClientError::remote),
        Err(_) if !status.is_success() => Err(ClientError::network(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        ))),
        Err(e) => Err(ClientError::network(format!(
            "Failed to parse response: {}",
            e
        ))),
    }
}

#[async_trait]
impl AnswerSource for AllocationClient {
    async fn fetch_answers(&self) -> Result<Vec<Answer>, ClientError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            warn!("Allocation endpoint not configured, using mock answers");
            return Ok(mock_answers());
        };

        match self.get_answers(endpoint).await {
            Ok(answers) => {
                debug!(count = answers.len(), "Fetched answers");
                Ok(answers)
            }
            Err(e) if e.is_network() && self.mock_fallback => {
                error!(error = %e, "Failed to fetch answers");
                warn!("Falling back to mock answers, check the allocation endpoint");
                Ok(mock_answers())
            }
            Err(e) => Err(e),
        }
    }

    async fn submit_response(
        &self,
        name: &str,
        selected_answer_id: &str,
    ) -> Result<(), ClientError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            warn!("Allocation endpoint not configured, simulating successful submission");
            return Ok(());
        };

        self.post_submission(endpoint, name, selected_answer_id)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to submit response"))
    }
}
