// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Prism provider bindings.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Prism configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrismConfig {
    /// DeepSeek result converter settings.
    #[serde(default)]
    pub deepseek: DeepSeekConfig,
}

/// DeepSeek result converter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeepSeekConfig {
    /// Model-family identifier the converter answers `supports` for.
    #[serde(default = "default_model_family")]
    pub model_family: String,

    /// Keep unparsable tool-call arguments as a raw payload instead of failing.
    #[serde(default)]
    pub lenient_tool_arguments: bool,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            model_family: default_model_family(),
            lenient_tool_arguments: false,
        }
    }
}

fn default_model_family() -> String {
    "deepseek".to_string()
}
