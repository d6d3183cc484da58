// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DeepSeek chat-completion response types and streaming chunk types.

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Response types ---

/// A full (non-streaming) chat-completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    /// Response ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Model that generated the response.
    #[serde(default)]
    pub model: Option<String>,
    /// Generated choices; only the first one is converted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<Choice>,
}

/// One choice of a full response.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    /// Reason the generation stopped.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message of a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    /// Visible content; `null` when the model only calls tools.
    #[serde(default)]
    pub content: Option<String>,
    /// Reasoning text for reasoner models.
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ApiToolCall>>,
}

/// A tool call inside a full response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiToolCall {
    pub id: String,
    /// Call type (always "function").
    #[serde(rename = "type", default)]
    pub call_type: Option<String>,
    pub function: ApiFunction,
}

/// Function name and JSON-encoded arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFunction {
    pub name: String,
    /// Arguments as a JSON-encoded string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub arguments: String,
}

// --- Error envelope ---

/// Top-level error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail within an error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Error code used for classification.
    #[serde(default)]
    pub code: Option<String>,
    /// Error type; used when `code` is absent.
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    /// Human-readable error message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl ApiErrorDetail {
    /// The code used for classification: `code`, else `type`, else empty.
    pub fn classification_code(&self) -> &str {
        self.code
            .as_deref()
            .or(self.type_.as_deref())
            .unwrap_or_default()
    }
}

// --- Streaming chunk types ---

/// One streaming event (`chat.completion.chunk`).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    /// Usage-only chunks carry no choices.
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<ChunkChoice>,
}

/// One choice of a streaming chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub delta: Delta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental update within a streaming choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

impl Delta {
    /// Reasoning text, treating `null` and `""` as absent.
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning_content.as_deref().filter(|s| !s.is_empty())
    }

    /// Visible text, treating `null` and `""` as absent.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|s| !s.is_empty())
    }
}

/// A fragment of a streamed tool call, keyed by `index`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallDelta {
    #[serde(default)]
    pub index: usize,
    /// Present on the first fragment of a call.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub function: Option<FunctionDelta>,
}

/// Function name (first fragment) and a piece of the argument text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}
