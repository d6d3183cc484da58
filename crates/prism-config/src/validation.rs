// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty identifiers.

use crate::diagnostic::ConfigError;
use crate::model::PrismConfig;

/// Check a model-family identifier: non-empty and free of whitespace.
///
/// Returns the failure message on error.
pub fn check_model_family(family: &str) -> Result<(), String> {
    if family.trim().is_empty() {
        Err("deepseek.model_family must not be empty".to_string())
    } else if family.chars().any(char::is_whitespace) {
        Err(format!(
            "deepseek.model_family `{family}` must not contain whitespace"
        ))
    } else {
        Ok(())
    }
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PrismConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(message) = check_model_family(&config.deepseek.model_family) {
        errors.push(ConfigError::Validation { message });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
