// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw inputs and typed results shared by every result converter.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::stream::{FusedStream, Stream};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PrismError;

/// A lazy, ordered stream of JSON event documents from a streaming response.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<Value, PrismError>> + Send>>;

/// A provider response as handed over by the transport layer.
///
/// Consumed exactly once by a converter.
pub enum RawResult {
    /// One buffered JSON document.
    Buffered(Value),
    /// A sequence of JSON event documents, one per server-sent event.
    Events(EventStream),
}

impl RawResult {
    /// Wraps a buffered JSON document.
    pub fn buffered(document: Value) -> Self {
        Self::Buffered(document)
    }

    /// Wraps any stream of JSON events.
    pub fn events<S>(events: S) -> Self
    where
        S: Stream<Item = Result<Value, PrismError>> + Send + 'static,
    {
        Self::Events(Box::pin(events))
    }

    /// Returns `true` when this result carries an event sequence.
    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Events(_))
    }
}

impl fmt::Debug for RawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffered(document) => f.debug_tuple("Buffered").field(document).finish(),
            Self::Events(_) => f.write_str("Events(..)"),
        }
    }
}

/// Options accompanying a conversion request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Whether the raw result is a streaming event sequence.
    pub stream: bool,
}

impl ConvertOptions {
    /// Options for converting a streaming response.
    pub fn streaming() -> Self {
        Self { stream: true }
    }
}

/// Final assistant message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    pub content: String,
}

/// A single requested function invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Arguments decoded from the provider's JSON-encoded argument string.
    pub arguments: Map<String, Value>,
}

/// One or more requested function invocations, in payload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolCall>,
}

/// A reasoning segment, distinct from the visible answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingContent {
    pub thinking: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl ThinkingContent {
    /// Creates an unsigned thinking segment.
    pub fn new(thinking: impl Into<String>) -> Self {
        Self {
            thinking: thinking.into(),
            signature: None,
        }
    }
}

/// One fragment produced by a streaming conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StreamFragment {
    /// Visible text, emitted as received.
    Text(String),
    /// A coalesced run of reasoning deltas.
    Thinking(ThinkingContent),
    /// A tool call reassembled from streamed deltas.
    ToolCall(ToolCall),
}

impl From<&str> for StreamFragment {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<ThinkingContent> for StreamFragment {
    fn from(thinking: ThinkingContent) -> Self {
        Self::Thinking(thinking)
    }
}

/// A lazy, single-pass sequence of [`StreamFragment`]s.
///
/// Once the underlying producer is exhausted every further poll yields
/// `None`; the sequence cannot be restarted.
pub struct StreamResult {
    inner: Pin<Box<dyn Stream<Item = Result<StreamFragment, PrismError>> + Send>>,
    terminated: bool,
}

impl StreamResult {
    /// Wraps a fragment producer.
    pub fn new<S>(fragments: S) -> Self
    where
        S: Stream<Item = Result<StreamFragment, PrismError>> + Send + 'static,
    {
        Self {
            inner: Box::pin(fragments),
            terminated: false,
        }
    }
}

impl Stream for StreamResult {
    type Item = Result<StreamFragment, PrismError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.terminated {
            return Poll::Ready(None);
        }
        let polled = this.inner.as_mut().poll_next(cx);
        if let Poll::Ready(None) = polled {
            this.terminated = true;
        }
        polled
    }
}

impl FusedStream for StreamResult {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl fmt::Debug for StreamResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResult")
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

/// The outcome of a successful conversion.
#[derive(Debug)]
pub enum ConvertedResult {
    Text(TextResult),
    ToolCalls(ToolCallResult),
    Stream(StreamResult),
}

impl ConvertedResult {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::ToolCalls(_) => "tool_calls",
            Self::Stream(_) => "stream",
        }
    }
}
