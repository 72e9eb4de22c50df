use log::{error, info};
use reqwest::Client;
use shared::{data_url, Analysis, AnalysisOutcome};
use thiserror::Error;

use super::model::{
    ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl, JsonSchemaFormat,
    MessageContent, ResponseFormat,
};
use super::prompt::analysis_schema;
use super::AnalysisMode;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("model provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model response contained no message content")]
    EmptyResponse,
    #[error("model output did not match the analysis schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Client for an OpenAI-compatible chat completions endpoint. One multimodal
/// invocation per analysis request; no retry, no timeout override.
#[derive(Clone)]
pub struct OpenAiService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiService {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// Sends the system prompt plus one user turn holding the images in
    /// submission order. Structured mode constrains the output to the
    /// analysis schema; text mode returns the raw content verbatim.
    pub async fn analyze(
        &self,
        system_prompt: &str,
        images: &[Vec<u8>],
        temperature: Option<f32>,
        mode: AnalysisMode,
    ) -> Result<AnalysisOutcome, OpenAiError> {
        let parts = images
            .iter()
            .map(|bytes| ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: data_url::encode("image/png", bytes),
                },
            })
            .collect();

        let response_format = match mode {
            AnalysisMode::Structured => Some(ResponseFormat {
                format_type: "json_schema".into(),
                json_schema: JsonSchemaFormat {
                    name: "profile_analysis".into(),
                    strict: true,
                    schema: analysis_schema(),
                },
            }),
            AnalysisMode::Text => None,
        };

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: MessageContent::Text(system_prompt.into()),
                },
                ChatMessage {
                    role: "user".into(),
                    content: MessageContent::Parts(parts),
                },
            ],
            temperature,
            response_format,
        };

        info!(
            "Requesting analysis of {} image(s) from model {}",
            images.len(),
            self.model
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Model provider error {}: {}", status, body);
            return Err(OpenAiError::Status { status, body });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(OpenAiError::EmptyResponse)?;

        match mode {
            AnalysisMode::Structured => {
                let analysis: Analysis = serde_json::from_str(&content)?;
                Ok(AnalysisOutcome::Structured(analysis))
            }
            AnalysisMode::Text => Ok(AnalysisOutcome::Text(content)),
        }
    }
}
