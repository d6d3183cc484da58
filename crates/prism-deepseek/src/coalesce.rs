// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coalescing of streamed reasoning deltas into thinking fragments.
//!
//! Consecutive `reasoning_content` deltas are buffered and emitted as one
//! [`ThinkingContent`] as soon as visible text arrives or the stream ends.
//! Visible text is never buffered.

use prism_core::{StreamFragment, ThinkingContent};

use crate::types::Delta;

/// Coalescer state carried from one delta to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CoalesceState {
    /// Nothing buffered.
    #[default]
    Idle,
    /// Reasoning text received since the last flush.
    AccumulatingThought(String),
}

impl CoalesceState {
    /// Advances the state by one delta, returning the fragments it releases.
    ///
    /// A delta carrying both fields is handled as reasoning followed by text.
    pub fn step(self, delta: &Delta) -> (Self, Vec<StreamFragment>) {
        let state = match (self, delta.reasoning()) {
            (Self::Idle, Some(reasoning)) => Self::AccumulatingThought(reasoning.to_string()),
            (Self::AccumulatingThought(mut buffer), Some(reasoning)) => {
                buffer.push_str(reasoning);
                Self::AccumulatingThought(buffer)
            }
            (state, None) => state,
        };

        let Some(text) = delta.text() else {
            return (state, Vec::new());
        };

        let mut fragments = Vec::with_capacity(2);
        fragments.extend(state.finish());
        fragments.push(StreamFragment::Text(text.to_string()));
        (Self::Idle, fragments)
    }

    /// Flushes any buffered reasoning at end of stream.
    pub fn finish(self) -> Option<StreamFragment> {
        match self {
            Self::Idle => None,
            Self::AccumulatingThought(buffer) => {
                Some(StreamFragment::Thinking(ThinkingContent::new(buffer)))
            }
        }
    }
}
