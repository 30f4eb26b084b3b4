//! Groq API連携（OpenAI互換 chat completions）
//!
//! 画像はData URL（base64）としてメッセージに埋め込む

use super::VisionAnalyzer;
use crate::config::Config;
use crate::error::{RxAiError, Result};
use crate::scanner::PrescriptionImage;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use prescription_ai_common::build_prescription_prompt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// モデルが何も返さなかった場合の応答（空の薬品リスト）
const EMPTY_RESPONSE: &str = "[]";

/// chat completions リクエスト
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

/// chat completions レスポンス
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// "data:image/jpeg;base64,..." 形式のData URLを作る
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// レスポンスから最初の選択肢の本文を取り出す（無ければ "[]"）
fn response_text(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| EMPTY_RESPONSE.to_string())
}

pub struct GroqAnalyzer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_completion_tokens: u32,
}

impl GroqAnalyzer {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_completion_tokens: config.max_completion_tokens,
        })
    }

    fn build_request(&self, data_url: String) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: build_prescription_prompt(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            temperature: self.temperature,
            max_completion_tokens: self.max_completion_tokens,
            top_p: 1.0,
        }
    }
}

#[async_trait]
impl VisionAnalyzer for GroqAnalyzer {
    fn name(&self) -> &str {
        "groq"
    }

    async fn analyze(&self, image: &PrescriptionImage) -> Result<String> {
        let bytes = image.read_bytes()?;
        let request = self.build_request(to_data_url(image.mime_type, &bytes));

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RxAiError::ApiCall(format!("Groq API failed ({}): {}", status, body)));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| RxAiError::ApiParse(format!("Groq レスポンス: {}", e)))?;

        Ok(response_text(payload))
    }
}
