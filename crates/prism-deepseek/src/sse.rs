// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE decoding for DeepSeek streaming chat completions.
//!
//! Turns a `text/event-stream` body into the JSON [`EventStream`] consumed by
//! the converter, using the `eventsource-stream` crate for SSE protocol
//! compliance.

use std::fmt::Display;

use eventsource_stream::Eventsource;
use futures::future;
use futures::stream::{Stream, StreamExt};
use prism_core::{EventStream, PrismError, RawResult};
use serde_json::Value;
use tracing::debug;

/// Payload of the final event of an OpenAI-style stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Decodes any byte stream carrying server-sent events into JSON events.
///
/// Each `data:` payload is parsed as JSON. The `[DONE]` sentinel ends the
/// stream; empty keep-alive payloads are skipped.
pub fn parse_sse_bytes<S, B, E>(bytes: S) -> EventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let events = bytes
        .eventsource()
        .take_while(|result| {
            let done = matches!(result, Ok(event) if event.data.trim() == DONE_SENTINEL);
            future::ready(!done)
        })
        .filter_map(|result| async move {
            match result {
                Ok(event) => {
                    if event.data.trim().is_empty() {
                        debug!(event = %event.event, "skipping empty SSE payload");
                        return None;
                    }
                    Some(
                        serde_json::from_str::<Value>(&event.data).map_err(|e| {
                            PrismError::MalformedResponse {
                                message: format!("SSE payload is not JSON: {e}"),
                                source: Some(Box::new(e)),
                            }
                        }),
                    )
                }
                Err(e) => Some(Err(PrismError::Stream {
                    message: format!("SSE stream error: {e}"),
                    source: None,
                })),
            }
        });

    Box::pin(events)
}

/// Decodes a streaming HTTP response body.
pub fn parse_sse_stream(response: reqwest::Response) -> EventStream {
    parse_sse_bytes(response.bytes_stream())
}

/// Wraps a streaming HTTP response as a [`RawResult`] ready for conversion.
pub fn raw_from_response(response: reqwest::Response) -> RawResult {
    RawResult::Events(parse_sse_stream(response))
}
