use std::future::Future;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    config::ClassifierConfig,
    domain::{ClassificationResult, EmailDraft},
};

use super::{
    inference::{build_request, first_choice_text, ChatCompletionResponse},
    verdict::parse_verdict,
};

pub const GENERIC_FAILURE: &str = "Failed to classify email. Please check your API key.";

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Unauthorized: GROQ_API_KEY is not configured")]
    MissingApiKey,
    #[error("API Error: {}", .0.as_u16())]
    Status(StatusCode),
    #[error("{}", GENERIC_FAILURE)]
    Transport(#[source] reqwest::Error),
    #[error("{}", GENERIC_FAILURE)]
    EmptyResponse,
}

/// Anything able to turn a draft into a folder verdict.
#[cfg_attr(test, mockall::automock)]
pub trait EmailClassifier: Send + Sync + 'static {
    fn classify(
        &self,
        draft: &EmailDraft,
    ) -> impl Future<Output = Result<ClassificationResult, ClassifyError>> + Send;
}

#[derive(Clone)]
pub struct CompletionClient {
    http: Client,
    config: ClassifierConfig,
}

impl CompletionClient {
    pub fn new(http: Client, config: ClassifierConfig) -> Self {
        Self { http, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl EmailClassifier for CompletionClient {
    async fn classify(&self, draft: &EmailDraft) -> Result<ClassificationResult, ClassifyError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ClassifyError::MissingApiKey)?;

        let request = build_request(&self.config, draft);
        let mut builder = self
            .http
            .post(self.config.api_url.clone())
            .bearer_auth(api_key)
            .json(&request);
        if let Some(timeout) = self.config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(ClassifyError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                target: "classifier",
                status = status.as_u16(),
                body = %body,
                "completion endpoint rejected the request"
            );
            return Err(ClassifyError::Status(status));
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(ClassifyError::Transport)?;
        let text = first_choice_text(completion).ok_or(ClassifyError::EmptyResponse)?;
        tracing::debug!(target: "classifier", answer = %text, "model answered");

        Ok(parse_verdict(&text))
    }
}
