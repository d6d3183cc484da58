// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lazy conversion of a streaming event sequence into content fragments.

use std::collections::VecDeque;

use futures::stream::{self, StreamExt};
use prism_core::{EventStream, PrismError, StreamFragment, StreamResult};
use serde_json::Value;
use tracing::debug;

use crate::coalesce::CoalesceState;
use crate::response::error_from_envelope;
use crate::tool_calls::ToolCallAccumulator;
use crate::types::ChatCompletionChunk;

type FragmentItem = Result<StreamFragment, PrismError>;

/// Everything the producer threads from one pull to the next.
struct Producer {
    source: EventStream,
    state: CoalesceState,
    tool_calls: ToolCallAccumulator,
    ready: VecDeque<FragmentItem>,
    done: bool,
    lenient: bool,
}

impl Producer {
    fn new(source: EventStream, lenient: bool) -> Self {
        Self {
            source,
            state: CoalesceState::Idle,
            tool_calls: ToolCallAccumulator::default(),
            ready: VecDeque::new(),
            done: false,
            lenient,
        }
    }

    /// Applies one event; may queue fragments and may end the stream.
    fn on_event(&mut self, event: Value) {
        if let Some(error) = error_from_envelope(&event) {
            self.fail(error);
            return;
        }

        let chunk: ChatCompletionChunk = match serde_json::from_value(event) {
            Ok(chunk) => chunk,
            Err(e) => {
                self.fail(PrismError::MalformedResponse {
                    message: format!("failed to parse stream chunk: {e}"),
                    source: Some(Box::new(e)),
                });
                return;
            }
        };

        let Some(choice) = chunk.choices.into_iter().next() else {
            return;
        };

        let (state, fragments) = std::mem::take(&mut self.state).step(&choice.delta);
        self.state = state;
        self.ready.extend(fragments.into_iter().map(Ok));

        for delta in choice.delta.tool_calls.iter().flatten() {
            self.tool_calls.push(delta);
        }

        if let Some(reason) = choice.finish_reason {
            debug!(finish_reason = %reason, "stream finished");
            self.finish();
        }
    }

    /// End of stream: flush pending reasoning, then completed tool calls.
    fn finish(&mut self) {
        self.ready
            .extend(std::mem::take(&mut self.state).finish().map(Ok));
        let tool_calls = std::mem::take(&mut self.tool_calls);
        if !tool_calls.is_empty() {
            match tool_calls.finish(self.lenient) {
                Ok(calls) => self
                    .ready
                    .extend(calls.into_iter().map(|c| Ok(StreamFragment::ToolCall(c)))),
                Err(e) => self.ready.push_back(Err(e)),
            }
        }
        self.done = true;
    }

    /// Aborts the stream with an error; buffered reasoning is discarded.
    fn fail(&mut self, error: PrismError) {
        self.state = CoalesceState::Idle;
        self.ready.push_back(Err(error));
        self.done = true;
    }
}

/// Wraps an event sequence into a lazily-evaluated [`StreamResult`].
///
/// Nothing is read from `source` until the result is polled. After a
/// `finish_reason`, an error, or source exhaustion no further events are read.
pub fn convert_events(source: EventStream, lenient: bool) -> StreamResult {
    let producer = Producer::new(source, lenient);
    StreamResult::new(stream::unfold(producer, |mut producer| async move {
        loop {
            if let Some(item) = producer.ready.pop_front() {
                return Some((item, producer));
            }
            if producer.done {
                return None;
            }
            match producer.source.next().await {
                Some(Ok(event)) => producer.on_event(event),
                Some(Err(e)) => producer.fail(e),
                None => producer.finish(),
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::ThinkingContent;
    use serde_json::json;

    fn events(values: Vec<Value>) -> EventStream {
        Box::pin(stream::iter(values.into_iter().map(Ok)))
    }

    fn reasoning(text: &str) -> Value {
        json!({"choices": [{"index": 0, "delta": {"reasoning_content": text}, "finish_reason": null}]})
    }

    fn content(text: &str) -> Value {
        json!({"choices": [{"index": 0, "delta": {"content": text}, "finish_reason": null}]})
    }

    fn finish() -> Value {
        json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]})
    }

    async fn drain(result: StreamResult) -> Vec<FragmentItem> {
        result.collect().await
    }

    #[tokio::test]
    async fn exhausted_source_flushes_reasoning() {
        let items = drain(convert_events(events(vec![reasoning("only")]), false)).await;
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].as_ref().unwrap(),
            &StreamFragment::Thinking(ThinkingContent::new("only"))
        );
    }

    #[tokio::test]
    async fn events_after_finish_are_not_read() {
        let source = events(vec![content("a"), finish(), content("ignored")]);
        let items = drain(convert_events(source, false)).await;
        let fragments: Vec<_> = items.into_iter().map(Result::unwrap).collect();
        assert_eq!(fragments, vec![StreamFragment::from("a")]);
    }

    #[tokio::test]
    async fn usage_only_chunk_is_skipped() {
        let source = events(vec![
            content("x"),
            json!({"choices": [], "usage": {"total_tokens": 3}}),
            content("y"),
        ]);
        let items = drain(convert_events(source, false)).await;
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn error_envelope_ends_stream() {
        let source = events(vec![
            reasoning("half a thought"),
            json!({"error": {"code": "content_filter", "message": "blocked"}}),
            content("never"),
        ]);
        let items = drain(convert_events(source, false)).await;
        assert_eq!(items.len(), 1);
        match &items[0] {
            Err(PrismError::ContentFilter { message }) => assert_eq!(message, "blocked"),
            other => panic!("expected ContentFilter, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparsable_chunk_is_malformed() {
        let source = events(vec![json!({"choices": "nope"})]);
        let items = drain(convert_events(source, false)).await;
        assert!(matches!(
            items.as_slice(),
            [Err(PrismError::MalformedResponse { .. })]
        ));
    }

    #[tokio::test]
    async fn tool_calls_follow_thinking_at_finish() {
        let source = events(vec![
            reasoning("need weather"),
            json!({"choices": [{"index": 0, "delta": {"tool_calls": [
                {"index": 0, "id": "call_1", "type": "function",
                 "function": {"name": "get_weather", "arguments": "{\"location\":"}}
            ]}}]}),
            json!({"choices": [{"index": 0, "delta": {"tool_calls": [
                {"index": 0, "function": {"arguments": "\"Paris\"}"}}
            ]}}]}),
            json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "tool_calls"}]}),
        ]);
        let fragments: Vec<_> = drain(convert_events(source, false))
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(fragments.len(), 2);
        assert_eq!(
            fragments[0],
            StreamFragment::Thinking(ThinkingContent::new("need weather"))
        );
        match &fragments[1] {
            StreamFragment::ToolCall(call) => {
                assert_eq!(call.id, "call_1");
                assert_eq!(call.name, "get_weather");
                assert_eq!(call.arguments["location"], "Paris");
            }
            other => panic!("expected ToolCall, got {other:?}"),
        }
    }
}
