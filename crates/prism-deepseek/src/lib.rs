// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DeepSeek result converter for Prism.
//!
//! This crate implements [`ResultConverter`] for the DeepSeek chat-completion
//! wire format: buffered responses become text or tool-call results, and
//! streaming responses become a lazy sequence of text, thinking, and
//! tool-call fragments.

pub mod coalesce;
pub mod response;
pub mod sse;
pub mod stream;
pub mod tool_calls;
pub mod types;

use prism_config::{DeepSeekConfig, check_model_family};
use prism_core::{ConvertOptions, ConvertedResult, PrismError, RawResult, ResultConverter};
use tracing::{debug, info};

/// Model-family identifier DeepSeek responses are routed by.
pub const MODEL_FAMILY: &str = "deepseek";

/// DeepSeek binding implementing [`ResultConverter`].
///
/// Holds only immutable settings; every conversion carries its own state.
#[derive(Debug, Clone)]
pub struct DeepSeekResultConverter {
    model_family: String,
    lenient_tool_arguments: bool,
}

impl DeepSeekResultConverter {
    /// Creates a converter with default settings.
    pub fn new() -> Self {
        Self {
            model_family: MODEL_FAMILY.to_string(),
            lenient_tool_arguments: false,
        }
    }

    /// Creates a converter from the `[deepseek]` configuration section.
    pub fn from_config(config: &DeepSeekConfig) -> Result<Self, PrismError> {
        check_model_family(&config.model_family).map_err(PrismError::Config)?;

        info!(
            model_family = %config.model_family,
            lenient_tool_arguments = config.lenient_tool_arguments,
            "DeepSeek result converter initialized"
        );

        Ok(Self {
            model_family: config.model_family.clone(),
            lenient_tool_arguments: config.lenient_tool_arguments,
        })
    }

    /// The model family this converter answers for.
    pub fn model_family(&self) -> &str {
        &self.model_family
    }
}

impl Default for DeepSeekResultConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultConverter for DeepSeekResultConverter {
    fn name(&self) -> &str {
        "deepseek"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    /// Accepts the family itself or a `<family>-<variant>` model id.
    fn supports(&self, model_id: &str) -> bool {
        match model_id.strip_prefix(self.model_family.as_str()) {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix('-')
                .is_some_and(|variant| !variant.is_empty() && !variant.contains(char::is_whitespace)),
            None => false,
        }
    }

    fn convert(
        &self,
        raw: RawResult,
        options: &ConvertOptions,
    ) -> Result<ConvertedResult, PrismError> {
        match (raw, options.stream) {
            (RawResult::Buffered(document), false) => {
                let result = response::convert_completion(document, self.lenient_tool_arguments);
                match &result {
                    Ok(converted) => debug!(kind = converted.kind(), "buffered response converted"),
                    Err(e) => debug!(error = %e, "buffered response rejected"),
                }
                result
            }
            (RawResult::Events(events), true) => {
                debug!("converting streaming response");
                Ok(ConvertedResult::Stream(stream::convert_events(
                    events,
                    self.lenient_tool_arguments,
                )))
            }
            (RawResult::Buffered(_), true) => Err(PrismError::InvalidInput(
                "streaming conversion requires an event sequence, got a buffered document".into(),
            )),
            (RawResult::Events(_), false) => Err(PrismError::InvalidInput(
                "buffered conversion requires a document, got an event sequence".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn plugin_metadata() {
        let converter = DeepSeekResultConverter::new();
        assert_eq!(converter.name(), "deepseek");
        assert_eq!(converter.version(), semver::Version::new(0, 1, 0));
        assert_eq!(converter.model_family(), MODEL_FAMILY);
    }

    #[test]
    fn supports_family_and_its_model_ids() {
        let converter = DeepSeekResultConverter::default();
        for id in ["deepseek", "deepseek-chat", "deepseek-reasoner"] {
            assert!(converter.supports(id), "should support {id:?}");
        }
        for other in [
            "openai",
            "gpt-4o",
            "DeepSeek",
            "DeepSeek-chat",
            " deepseek",
            "deepseek ",
            "deepseek-",
            "deepseekchat",
            "deepseek- chat",
            "",
        ] {
            assert!(!converter.supports(other), "should not support {other:?}");
        }
    }

    #[test]
    fn from_config_uses_configured_family() {
        let config = DeepSeekConfig {
            model_family: "deepseek-r".into(),
            lenient_tool_arguments: true,
        };
        let converter = DeepSeekResultConverter::from_config(&config).unwrap();
        assert!(converter.supports("deepseek-r"));
        assert!(converter.supports("deepseek-r-lite"));
        assert!(!converter.supports("deepseek"));
        assert!(!converter.supports("deepseek-chat"));
    }

    #[test]
    fn from_config_rejects_blank_family() {
        let config = DeepSeekConfig {
            model_family: "   ".into(),
            lenient_tool_arguments: false,
        };
        assert!(matches!(
            DeepSeekResultConverter::from_config(&config),
            Err(PrismError::Config(_))
        ));
    }

    #[test]
    fn from_config_rejects_padded_family() {
        let config = DeepSeekConfig {
            model_family: " deepseek".into(),
            lenient_tool_arguments: false,
        };
        assert!(DeepSeekResultConverter::from_config(&config).is_err());
    }

    #[test]
    fn from_config_matches_config_validation() {
        let config = DeepSeekConfig {
            model_family: "deep seek".into(),
            lenient_tool_arguments: false,
        };
        match DeepSeekResultConverter::from_config(&config) {
            Err(PrismError::Config(message)) => assert!(message.contains("whitespace")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn buffered_document_with_stream_flag_is_invalid_input() {
        let converter = DeepSeekResultConverter::new();
        let raw = RawResult::buffered(json!({"choices": []}));
        let err = converter
            .convert(raw, &ConvertOptions::streaming())
            .unwrap_err();
        assert!(matches!(err, PrismError::InvalidInput(_)));
    }

    #[test]
    fn event_sequence_without_stream_flag_is_invalid_input() {
        let converter = DeepSeekResultConverter::new();
        let raw = RawResult::events(futures::stream::empty());
        let err = converter
            .convert(raw, &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, PrismError::InvalidInput(_)));
    }

    #[test]
    #[traced_test]
    fn buffered_conversion_is_logged() {
        let converter = DeepSeekResultConverter::new();
        let raw = RawResult::buffered(json!({
            "choices": [{"message": {"role": "assistant", "content": "hi"}, "finish_reason": "stop"}]
        }));
        let result = converter.convert(raw, &ConvertOptions::default()).unwrap();
        assert_eq!(result.kind(), "text");
        assert!(logs_contain("buffered response converted"));
    }

    #[test]
    #[traced_test]
    fn from_config_logs_initialization() {
        let _ = DeepSeekResultConverter::from_config(&DeepSeekConfig::default()).unwrap();
        assert!(logs_contain("DeepSeek result converter initialized"));
    }
}
