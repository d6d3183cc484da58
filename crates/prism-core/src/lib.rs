// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Prism provider bindings.
//!
//! This crate provides the typed results, the raw-response handle, the
//! [`ResultConverter`] trait, and the error taxonomy shared by every provider
//! binding in the Prism workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{PrismError, ProviderErrorCode};
pub use traits::ResultConverter;
pub use types::{
    ConvertOptions, ConvertedResult, EventStream, RawResult, StreamFragment, StreamResult,
    TextResult, ThinkingContent, ToolCall, ToolCallResult,
};

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use futures::stream;
    use futures_core::stream::FusedStream;

    #[test]
    fn prism_error_has_all_variants() {
        let _filter = PrismError::ContentFilter {
            message: "test".into(),
        };
        let _invalid = PrismError::InvalidRequest {
            message: "test".into(),
        };
        let _provider = PrismError::Provider {
            code: "server_error".into(),
            message: "test".into(),
        };
        let _malformed = PrismError::MalformedResponse {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _stream = PrismError::Stream {
            message: "test".into(),
            source: None,
        };
        let _input = PrismError::InvalidInput("test".into());
        let _config = PrismError::Config("test".into());
    }

    #[test]
    fn classify_known_codes() {
        assert_eq!(
            ProviderErrorCode::classify("content_filter"),
            ProviderErrorCode::ContentFilter
        );
        assert_eq!(
            ProviderErrorCode::classify("invalid_request_error"),
            ProviderErrorCode::InvalidRequest
        );
    }

    #[test]
    fn classify_unknown_code_keeps_original() {
        assert_eq!(
            ProviderErrorCode::classify("rate_limit_exceeded"),
            ProviderErrorCode::Other("rate_limit_exceeded".into())
        );
    }

    #[test]
    fn from_provider_passes_message_verbatim() {
        match PrismError::from_provider("content_filter", "Blocked: policy 7.") {
            PrismError::ContentFilter { message } => assert_eq!(message, "Blocked: policy 7."),
            other => panic!("expected ContentFilter, got {other:?}"),
        }
        match PrismError::from_provider("invalid_request_error", "bad `messages`") {
            PrismError::InvalidRequest { message } => assert_eq!(message, "bad `messages`"),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
        match PrismError::from_provider("server_overloaded", "try later") {
            PrismError::Provider { code, message } => {
                assert_eq!(code, "server_overloaded");
                assert_eq!(message, "try later");
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn error_display_includes_message() {
        let err = PrismError::from_provider("content_filter", "nope");
        assert_eq!(err.to_string(), "content filtered by provider: nope");
        let err = PrismError::from_provider("quota", "exhausted");
        assert_eq!(err.to_string(), "provider error (quota): exhausted");
    }

    #[test]
    fn convert_options_default_is_buffered() {
        assert!(!ConvertOptions::default().stream);
        assert!(ConvertOptions::streaming().stream);
    }

    #[test]
    fn raw_result_shape() {
        let buffered = RawResult::buffered(serde_json::json!({"choices": []}));
        assert!(!buffered.is_streaming());
        let events = RawResult::events(stream::empty());
        assert!(events.is_streaming());
        assert_eq!(format!("{events:?}"), "Events(..)");
    }

    #[test]
    fn thinking_content_is_unsigned_by_default() {
        let thinking = ThinkingContent::new("hmm");
        assert_eq!(thinking.thinking, "hmm");
        assert!(thinking.signature.is_none());
        let json = serde_json::to_value(&thinking).expect("should serialize");
        assert!(json.get("signature").is_none());
    }

    #[test]
    fn stream_fragment_serialization() {
        let fragment = StreamFragment::from("hi");
        let json = serde_json::to_value(&fragment).expect("should serialize");
        assert_eq!(json["type"], "text");
        assert_eq!(json["data"], "hi");

        let fragment = StreamFragment::from(ThinkingContent::new("why"));
        let json = serde_json::to_value(&fragment).expect("should serialize");
        assert_eq!(json["type"], "thinking");
        assert_eq!(json["data"]["thinking"], "why");
    }

    #[tokio::test]
    async fn stream_result_is_single_pass() {
        let mut result = StreamResult::new(stream::iter(vec![
            Ok(StreamFragment::from("a")),
            Ok(StreamFragment::from("b")),
        ]));
        assert!(!result.is_terminated());

        let first: Vec<_> = result.by_ref().collect().await;
        assert_eq!(first.len(), 2);
        assert!(result.is_terminated());

        // Exhausted: polling again yields nothing.
        assert!(result.next().await.is_none());
        assert!(result.next().await.is_none());
    }

    #[test]
    fn converted_result_kind() {
        let text = ConvertedResult::Text(TextResult {
            content: "x".into(),
        });
        assert_eq!(text.kind(), "text");
        let tools = ConvertedResult::ToolCalls(ToolCallResult { content: vec![] });
        assert_eq!(tools.kind(), "tool_calls");
        let streamed = ConvertedResult::Stream(StreamResult::new(stream::empty()));
        assert_eq!(streamed.kind(), "stream");
    }

    #[test]
    fn converter_trait_is_object_safe() {
        fn _assert_object_safe(_: &dyn ResultConverter) {}
    }
}
