// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions implemented by provider bindings.

pub mod converter;

pub use converter::ResultConverter;
