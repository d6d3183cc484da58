// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool-call argument decoding and reassembly of streamed tool-call deltas.

use std::collections::BTreeMap;

use prism_core::{PrismError, ToolCall};
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::types::ToolCallDelta;

/// Decodes a JSON-encoded argument string into a key-value map.
///
/// An empty string decodes to an empty map. Anything that is not a JSON
/// object fails, unless `lenient` is set, in which case the raw text is kept
/// under `_raw` alongside a `_parse_error` description.
pub fn parse_arguments(
    name: &str,
    raw: &str,
    lenient: bool,
) -> Result<Map<String, Value>, PrismError> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }

    let (reason, source): (String, Option<serde_json::Error>) =
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => return Ok(map),
            Ok(other) => (format!("expected a JSON object, found `{other}`"), None),
            Err(e) => (e.to_string(), Some(e)),
        };

    if lenient {
        warn!(tool = name, error = %reason, raw, "keeping unparsable tool arguments as raw text");
        let mut map = Map::new();
        map.insert("_raw".into(), json!(raw));
        map.insert("_parse_error".into(), json!(reason));
        return Ok(map);
    }

    Err(PrismError::MalformedResponse {
        message: format!("arguments of tool call `{name}` are not a JSON object: {reason}"),
        source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    })
}

/// Partially received tool call.
#[derive(Debug, Default)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Collects streamed tool-call fragments keyed by their `index`.
///
/// The first fragment of a call carries its id and name; later fragments
/// only append argument text.
#[derive(Debug, Default)]
pub struct ToolCallAccumulator {
    calls: BTreeMap<usize, PendingToolCall>,
}

impl ToolCallAccumulator {
    /// Folds one fragment into the pending call at its index.
    pub fn push(&mut self, delta: &ToolCallDelta) {
        let pending = self.calls.entry(delta.index).or_default();
        if let Some(id) = delta.id.as_deref()
            && !id.is_empty()
        {
            pending.id = id.to_string();
        }
        if let Some(function) = &delta.function {
            if let Some(name) = function.name.as_deref()
                && !name.is_empty()
            {
                pending.name = name.to_string();
            }
            if let Some(arguments) = function.arguments.as_deref() {
                pending.arguments.push_str(arguments);
            }
        }
    }

    /// Returns `true` when no fragment has been seen.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Completes every pending call, in index order.
    pub fn finish(self, lenient: bool) -> Result<Vec<ToolCall>, PrismError> {
        self.calls
            .into_iter()
            .map(|(index, pending)| {
                if pending.id.is_empty() || pending.name.is_empty() {
                    return Err(PrismError::malformed(format!(
                        "streamed tool call at index {index} is missing its id or name"
                    )));
                }
                let arguments = parse_arguments(&pending.name, &pending.arguments, lenient)?;
                Ok(ToolCall {
                    id: pending.id,
                    name: pending.name,
                    arguments,
                })
            })
            .collect()
    }
}
