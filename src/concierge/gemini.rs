//! Gemini `generateContent` backend for [`ChatModel`].

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::model::{ChatModel, ModelReply, ToolCall, ToolSpec, Turn};

/// Public Gemini REST endpoint.
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Models tried after the profile's preferred one.
const FALLBACK_MODELS: [&str; 2] = ["gemini-1.5-flash-latest", "gemini-1.5-flash"];

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDeclarations>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDeclarations {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: &'static str,
    description: &'static str,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }
}

impl Content {
    fn with_role(role: &str, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts,
        }
    }
}

fn build_request(system_prompt: &str, transcript: &[Turn], tools: &[ToolSpec]) -> GenerateRequest {
    let contents = transcript
        .iter()
        .map(|turn| match turn {
            Turn::User(text) => Content::with_role("user", vec![Part::text(text)]),
            Turn::Model(text) => Content::with_role("model", vec![Part::text(text)]),
            Turn::ToolCalls(calls) => Content::with_role(
                "model",
                calls
                    .iter()
                    .map(|call| Part {
                        function_call: Some(FunctionCall {
                            name: call.name.clone(),
                            args: call.args.clone(),
                        }),
                        ..Part::default()
                    })
                    .collect(),
            ),
            Turn::ToolResults(results) => Content::with_role(
                "user",
                results
                    .iter()
                    .map(|result| Part {
                        function_response: Some(FunctionResponse {
                            name: result.name.clone(),
                            response: json!({ "content": result.output }),
                        }),
                        ..Part::default()
                    })
                    .collect(),
            ),
        })
        .collect();

    let tools = if tools.is_empty() {
        Vec::new()
    } else {
        vec![ToolDeclarations {
            function_declarations: tools
                .iter()
                .map(|spec| FunctionDeclaration {
                    name: spec.name,
                    description: spec.description,
                    parameters: spec.parameters.clone(),
                })
                .collect(),
        }]
    };

    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part::text(system_prompt)],
        },
        contents,
        tools,
    }
}

fn parse_reply(response: GenerateResponse) -> Result<ModelReply> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Gemini returned no candidates"))?;

    let mut calls = Vec::new();
    let mut text = String::new();
    for part in candidate.content.parts {
        if let Some(call) = part.function_call {
            calls.push(ToolCall {
                name: call.name,
                args: call.args,
            });
        } else if let Some(chunk) = part.text {
            text.push_str(&chunk);
        }
    }

    if !calls.is_empty() {
        return Ok(ModelReply::ToolCalls(calls));
    }
    if text.trim().is_empty() {
        return Err(anyhow!("Gemini returned an empty reply"));
    }
    Ok(ModelReply::Text(text))
}

// =============================================================================
// Client
// =============================================================================

/// Gemini REST client with model fallback.
#[derive(Debug, Clone)]
pub struct GeminiModel {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
    models: Vec<String>,
}

impl GeminiModel {
    /// Creates a client preferring `model`, then the built-in fallbacks.
    #[must_use]
    pub fn new(api_key: &str, model: &str) -> Self {
        let mut models = vec![model.to_string()];
        for fallback in FALLBACK_MODELS {
            if !models.iter().any(|m| m == fallback) {
                models.push(fallback.to_string());
            }
        }
        Self {
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
            base_url: GEMINI_API_URL.to_string(),
            models,
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Uses a preconfigured HTTP client (timeouts, proxies).
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(&self.api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn generate_with(&self, model: &str, request: &GenerateRequest) -> Result<ModelReply> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        debug!(model, turns = request.contents.len(), "Gemini generate request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("Gemini API error ({status}): {error_text}"));
        }

        parse_reply(response.json().await?)
    }
}

#[async_trait]
impl ChatModel for GeminiModel {
    fn name(&self) -> &str {
        self.models.first().map_or("unknown", String::as_str)
    }

    async fn generate(
        &self,
        system_prompt: &str,
        transcript: &[Turn],
        tools: &[ToolSpec],
    ) -> Result<ModelReply> {
        let request = build_request(system_prompt, transcript, tools);
        let mut last_error = anyhow!("no Gemini models configured");
        for model in &self.models {
            match self.generate_with(model, &request).await {
                Ok(reply) => return Ok(reply),
                Err(e) => {
                    warn!(model = %model, error = %e, "Gemini model failed, trying next");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}
