//! Groq chat-completions classifier
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint in JSON mode
//! and deserializes the reply into the requested record type. Field
//! constraints (e.g. urgency range) are enforced by the record's own
//! `Deserialize` impl, so an out-of-range value surfaces as `Malformed`.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::prompts::{PRIORITIZATION_SYSTEM_PROMPT, TRIAGE_SYSTEM_PROMPT};
use crate::config::{ClassifierConfig, SamplingConfig};
use crate::domain::entities::{PriorityRecord, TriageRecord};
use crate::domain::ports::Classifier;
use crate::error::ClassifierError;

/// Classifier backed by a hosted chat model
pub struct GroqClassifier<R> {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    sampling: SamplingConfig,
    system_prompt: &'static str,
    timeout: Duration,
    _record: PhantomData<fn() -> R>,
}

impl<R> GroqClassifier<R> {
    pub fn new(
        config: &ClassifierConfig,
        system_prompt: &'static str,
    ) -> Result<Self, ClassifierError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            sampling: config.sampling,
            system_prompt,
            timeout: config.timeout,
            _record: PhantomData,
        })
    }

    fn map_transport(&self, error: reqwest::Error) -> ClassifierError {
        if error.is_timeout() {
            ClassifierError::Timeout(self.timeout)
        } else {
            ClassifierError::Request(error)
        }
    }
}

impl GroqClassifier<TriageRecord> {
    /// Ticket text -> category, urgency and sentiment
    pub fn triage(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        Self::new(config, TRIAGE_SYSTEM_PROMPT)
    }
}

impl GroqClassifier<PriorityRecord> {
    /// Account metadata + sentiment -> business impact and customer risk
    pub fn prioritization(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        Self::new(config, PRIORITIZATION_SYSTEM_PROMPT)
    }
}

/// Request types for the chat-completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(flatten)]
    sampling: SamplingConfig,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, ClassifierError> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| ClassifierError::Malformed(e.to_string()))
    } else if status.as_u16() == 401 {
        Err(ClassifierError::Unauthorized)
    } else if status.as_u16() == 429 {
        Err(ClassifierError::RateLimited)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ClassifierError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull the first choice's content out of a completion
fn completion_content(completion: ChatResponse) -> Result<String, ClassifierError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(ClassifierError::EmptyResponse)
}

/// Deserialize model output into a record
///
/// Tolerates a markdown code fence around the JSON.
pub(crate) fn parse_record<R: DeserializeOwned>(content: &str) -> Result<R, ClassifierError> {
    let body = content.trim();
    let body = body
        .strip_prefix("```json")
        .or_else(|| body.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(body)
        .trim();

    serde_json::from_str(body).map_err(|e| ClassifierError::Malformed(e.to_string()))
}

#[async_trait]
impl<R> Classifier<R> for GroqClassifier<R>
where
    R: DeserializeOwned + Send + 'static,
{
    async fn classify(&self, prompt: &str) -> Result<R, ClassifierError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            sampling: self.sampling,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let completion = handle_response(response).await?;
        let content = completion_content(completion)?;
        tracing::debug!(model = %self.model, "Classifier replied: {}", content);

        parse_record(&content)
    }
}
