// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for codecanvas-server.

pub mod ai;
pub mod auth;
pub mod http;
pub mod i18n;
pub mod logging;
pub mod requests;

pub use ai::{AiConfig, AiConfigLayer};
pub use auth::{AuthConfig, AuthConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use i18n::{I18nConfig, I18nConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use requests::{RequestsConfig, RequestsConfigLayer};
