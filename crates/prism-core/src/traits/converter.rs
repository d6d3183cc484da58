// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result converter trait for provider wire-format bindings (DeepSeek, etc.).

use crate::error::PrismError;
use crate::types::{ConvertOptions, ConvertedResult, RawResult};

/// Translates one provider's raw responses into typed results.
///
/// A dispatcher asks each registered converter whether it [`supports`] a
/// model id and hands the raw response to the first one that does.
///
/// [`supports`]: ResultConverter::supports
pub trait ResultConverter: Send + Sync + 'static {
    /// Returns the human-readable name of this binding.
    fn name(&self) -> &str;

    /// Returns the semantic version of this binding.
    fn version(&self) -> semver::Version;

    /// Returns `true` iff `model_id` belongs to the binding's model family.
    fn supports(&self, model_id: &str) -> bool;

    /// Converts a raw response.
    ///
    /// Buffered documents produce [`ConvertedResult::Text`] or
    /// [`ConvertedResult::ToolCalls`]; event sequences produce
    /// [`ConvertedResult::Stream`]. An error envelope in a buffered document
    /// fails the call instead.
    fn convert(
        &self,
        raw: RawResult,
        options: &ConvertOptions,
    ) -> Result<ConvertedResult, PrismError>;
}
