// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bridges Figment extraction errors into miette diagnostics.
//!
//! Unknown keys get a source span when the offending file is known and a
//! "did you mean" hint based on Jaro-Winkler similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler score for a key to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(prism::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(prism::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A semantic check on a deserialized value failed.
    #[error("validation error: {message}")]
    #[diagnostic(code(prism::config::validation))]
    Validation { message: String },

    /// Anything Figment reports that has no dedicated variant.
    #[error("configuration error: {0}")]
    #[diagnostic(code(prism::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
///
/// `toml_sources` pairs a file path with its contents and is used to attach
/// source spans to unknown-key errors.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate_key(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.clone(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Resolve the file an error came from and the byte span of the key inside it.
fn locate_key(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = match error.metadata.as_ref().and_then(|m| m.source.as_ref()) {
        Some(figment::Source::File(path)) => path.display().to_string(),
        _ => return (None, None),
    };
    let Some((path, content)) = toml_sources.iter().find(|(p, _)| *p == origin) else {
        return (None, None);
    };
    match find_key_offset(content, &error.path, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` in TOML `content`, searching after the `[section]`
/// header named by the first element of `path` (or from the top when empty).
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut line_start = start;
    for line in content[start..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let rest = &line[indent..];
        if let Some(after) = rest.strip_prefix(field)
            && after.trim_start().starts_with('=')
        {
            return Some(line_start + indent);
        }
        line_start += line.len();
    }
    None
}

/// Suggest the closest valid key, if any is similar enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

fn render_with(handler: &GraphicalReportHandler, errors: &[ConfigError]) -> String {
    let mut out = String::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => out.push_str(&buf),
            Err(_) => out.push_str(&format!("Error: {error}\n")),
        }
    }
    out
}

/// Render diagnostics as plain text, without color codes.
pub fn render_plain(errors: &[ConfigError]) -> String {
    render_with(
        &GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor()),
        errors,
    )
}

/// Render diagnostics to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    eprint!("{}", render_with(&GraphicalReportHandler::new(), errors));
}
