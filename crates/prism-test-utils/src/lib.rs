// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Prism provider bindings.
//!
//! # Components
//!
//! - [`fixtures`] - Builders for DeepSeek buffered responses, streaming events, and SSE bodies
//! - [`MockEventSource`] - In-memory event stream with a pull counter

pub mod fixtures;
pub mod mock_source;

use futures::StreamExt;
use prism_core::{PrismError, StreamFragment, StreamResult};

pub use mock_source::{MockEventSource, raw_events};

/// Drain a [`StreamResult`], stopping at the first error.
pub async fn collect_fragments(
    stream: &mut StreamResult,
) -> Result<Vec<StreamFragment>, PrismError> {
    let mut fragments = Vec::new();
    while let Some(item) = stream.next().await {
        fragments.push(item?);
    }
    Ok(fragments)
}
