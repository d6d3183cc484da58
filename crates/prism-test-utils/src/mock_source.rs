// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory event source standing in for a provider's streaming transport.
//!
//! `MockEventSource` replays pre-configured events and counts how many were
//! actually pulled, so tests can observe laziness and early termination.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use prism_core::{EventStream, PrismError, RawResult};
use serde_json::Value;

/// A replayable queue of streaming events.
#[derive(Default)]
pub struct MockEventSource {
    items: VecDeque<Result<Value, PrismError>>,
    pulled: Arc<AtomicUsize>,
}

impl MockEventSource {
    /// Create a source that yields the given events in order.
    pub fn new(events: Vec<Value>) -> Self {
        Self {
            items: events.into_iter().map(Ok).collect(),
            pulled: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Append a transport error after the configured events.
    pub fn then_error(mut self, error: PrismError) -> Self {
        self.items.push_back(Err(error));
        self
    }

    /// Shared counter of items pulled from the stream so far.
    pub fn pulled(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.pulled)
    }

    /// Turn the queue into an [`EventStream`].
    pub fn into_stream(self) -> EventStream {
        let pulled = self.pulled;
        Box::pin(stream::iter(self.items).inspect(move |_| {
            pulled.fetch_add(1, Ordering::SeqCst);
        }))
    }

    /// Wrap the queue as a streaming [`RawResult`].
    pub fn into_raw(self) -> RawResult {
        RawResult::Events(self.into_stream())
    }
}

/// Shorthand for a streaming [`RawResult`] over the given events.
pub fn raw_events(events: Vec<Value>) -> RawResult {
    MockEventSource::new(events).into_raw()
}
