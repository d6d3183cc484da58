// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of buffered chat-completion documents.

use prism_core::{ConvertedResult, PrismError, TextResult, ToolCall, ToolCallResult};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::tool_calls::parse_arguments;
use crate::types::{ApiErrorResponse, ChatCompletion};

/// Classifies a top-level `error` envelope, if the document carries one.
pub(crate) fn error_from_envelope(document: &Value) -> Option<PrismError> {
    let error = document.get("error").filter(|e| !e.is_null())?;
    let classified = match ApiErrorResponse::deserialize(document) {
        Ok(ApiErrorResponse { error: detail }) => {
            let code = detail.classification_code().to_string();
            PrismError::from_provider(&code, detail.message)
        }
        Err(e) => PrismError::MalformedResponse {
            message: format!("unrecognized error envelope: {error}"),
            source: Some(Box::new(e)),
        },
    };
    Some(classified)
}

/// Converts a buffered response into text or tool calls.
///
/// Only the first choice is considered. Non-empty `tool_calls` win over
/// `content`.
pub fn convert_completion(document: Value, lenient: bool) -> Result<ConvertedResult, PrismError> {
    if let Some(error) = error_from_envelope(&document) {
        return Err(error);
    }

    let completion: ChatCompletion =
        serde_json::from_value(document).map_err(|e| PrismError::MalformedResponse {
            message: format!("failed to parse chat completion: {e}"),
            source: Some(Box::new(e)),
        })?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| PrismError::malformed("chat completion has no choices"))?;
    let message = choice.message;

    if let Some(calls) = message.tool_calls
        && !calls.is_empty()
    {
        let content = calls
            .into_iter()
            .map(|call| {
                let arguments =
                    parse_arguments(&call.function.name, &call.function.arguments, lenient)?;
                Ok(ToolCall {
                    id: call.id,
                    name: call.function.name,
                    arguments,
                })
            })
            .collect::<Result<Vec<_>, PrismError>>()?;
        debug!(
            count = content.len(),
            finish_reason = ?choice.finish_reason,
            "converted tool-call response"
        );
        return Ok(ConvertedResult::ToolCalls(ToolCallResult { content }));
    }

    match message.content {
        Some(content) => {
            debug!(
                len = content.len(),
                finish_reason = ?choice.finish_reason,
                "converted text response"
            );
            Ok(ConvertedResult::Text(TextResult { content }))
        }
        None => Err(PrismError::malformed(
            "first choice has neither content nor tool calls",
        )),
    }
}
