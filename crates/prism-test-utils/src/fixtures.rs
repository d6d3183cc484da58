// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON payload builders in the DeepSeek chat-completion wire format.

use serde_json::{Value, json};

/// A buffered completion whose first choice carries plain text.
pub fn text_response(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// A buffered completion requesting the given `(id, name, arguments)` tool calls.
///
/// `arguments` is JSON-encoded into a string, as the provider sends it.
pub fn tool_call_response(calls: &[(&str, &str, Value)]) -> Value {
    let tool_calls: Vec<Value> = calls
        .iter()
        .map(|(id, name, arguments)| {
            json!({
                "id": id,
                "type": "function",
                "function": { "name": name, "arguments": arguments.to_string() }
            })
        })
        .collect();

    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": null, "tool_calls": tool_calls },
            "finish_reason": "tool_calls"
        }]
    })
}

/// A tool-call completion whose arguments are sent as the given raw string.
pub fn raw_tool_call_response(id: &str, name: &str, raw_arguments: &str) -> Value {
    json!({
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": id,
                    "type": "function",
                    "function": { "name": name, "arguments": raw_arguments }
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
}

/// A top-level error envelope.
pub fn error_response(code: &str, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message } })
}

/// A streaming event carrying a reasoning fragment.
pub fn reasoning_delta(text: &str) -> Value {
    chunk(json!({ "reasoning_content": text }), None)
}

/// A streaming event carrying a visible-text fragment.
pub fn content_delta(text: &str) -> Value {
    chunk(json!({ "content": text }), None)
}

/// A streaming event carrying one tool-call fragment.
pub fn tool_call_delta(index: usize, id: Option<&str>, name: Option<&str>, arguments: &str) -> Value {
    let mut function = json!({ "arguments": arguments });
    if let Some(name) = name {
        function["name"] = json!(name);
    }
    let mut call = json!({ "index": index, "type": "function", "function": function });
    if let Some(id) = id {
        call["id"] = json!(id);
    }
    chunk(json!({ "tool_calls": [call] }), None)
}

/// The terminating event: empty delta plus a finish reason.
pub fn finish_event(reason: &str) -> Value {
    chunk(json!({}), Some(reason))
}

fn chunk(delta: Value, finish_reason: Option<&str>) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "model": "deepseek-reasoner",
        "choices": [{ "index": 0, "delta": delta, "finish_reason": finish_reason }]
    })
}

/// Renders events as a `text/event-stream` body terminated by `[DONE]`.
pub fn sse_body(events: &[Value]) -> String {
    let mut body: String = events.iter().map(|e| format!("data: {e}\n\n")).collect();
    body.push_str("data: [DONE]\n\n");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_call_arguments_are_json_encoded_strings() {
        let value = tool_call_response(&[("call_1", "get_weather", json!({"location": "Paris"}))]);
        let arguments = &value["choices"][0]["message"]["tool_calls"][0]["function"]["arguments"];
        assert_eq!(arguments, "{\"location\":\"Paris\"}");
    }

    #[test]
    fn finish_event_has_empty_delta() {
        let value = finish_event("stop");
        assert_eq!(value["choices"][0]["delta"], json!({}));
        assert_eq!(value["choices"][0]["finish_reason"], "stop");
    }

    #[test]
    fn sse_body_ends_with_done() {
        let body = sse_body(&[content_delta("hi")]);
        assert!(body.starts_with("data: {"));
        assert!(body.ends_with("data: [DONE]\n\n"));
    }
}
