// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Prism provider bindings.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use prism_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("DeepSeek family: {}", config.deepseek.model_family);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, render_plain, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{DeepSeekConfig, PrismConfig};
pub use validation::check_model_family;

use tracing::debug;

/// Load configuration from the XDG hierarchy and validate it.
///
/// On a Figment error the TOML sources are re-read so unknown keys can be
/// reported with source spans.
pub fn load_and_validate() -> Result<PrismConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            debug!(
                model_family = %config.deepseek.model_family,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PrismConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_PATH))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_PATH.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
