// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./prism.toml` > `~/.config/prism/prism.toml` > `/etc/prism/prism.toml`
//! with environment variable overrides via `PRISM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PrismConfig;

/// System-wide configuration file.
pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/prism/prism.toml";

/// Local configuration file, relative to the working directory.
pub(crate) const LOCAL_CONFIG_PATH: &str = "prism.toml";

/// Path of the per-user configuration file, if the platform has a config dir.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("prism/prism.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/prism/prism.toml` (system-wide)
/// 3. `~/.config/prism/prism.toml` (user XDG config)
/// 4. `./prism.toml` (local directory)
/// 5. `PRISM_*` environment variables
pub fn load_config() -> Result<PrismConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PrismConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrismConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PrismConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrismConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PrismConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `PRISM_DEEPSEEK_MODEL_FAMILY`
/// must map to `deepseek.model_family`, not `deepseek.model.family`.
fn env_provider() -> Env {
    Env::prefixed("PRISM_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        key.as_str().replacen("deepseek_", "deepseek.", 1).into()
    })
}
