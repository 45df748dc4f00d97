// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication configuration section.

use serde::Deserialize;

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "codecanvas_session";
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 7 * 24 * 60 * 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
	/// Expose a mock admin user when nobody is signed in. Development only.
	pub test_mode: bool,
	/// Deployment environment name ("development", "production", ...).
	pub environment: String,
	pub session_cookie_name: String,
	pub signups_disabled: bool,
	/// Sessions unused for this long are evicted.
	pub session_idle_timeout_secs: u64,
	/// Upper bound on live sessions; the least recently used is evicted first.
	pub max_sessions: usize,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			test_mode: false,
			environment: "development".to_string(),
			session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
			signups_disabled: false,
			session_idle_timeout_secs: DEFAULT_SESSION_IDLE_TIMEOUT_SECS,
			max_sessions: DEFAULT_MAX_SESSIONS,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub test_mode: Option<bool>,
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub session_cookie_name: Option<String>,
	#[serde(default)]
	pub signups_disabled: Option<bool>,
	#[serde(default)]
	pub session_idle_timeout_secs: Option<u64>,
	#[serde(default)]
	pub max_sessions: Option<usize>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.test_mode.is_some() {
			self.test_mode = other.test_mode;
		}
		if other.environment.is_some() {
			self.environment = other.environment;
		}
		if other.session_cookie_name.is_some() {
			self.session_cookie_name = other.session_cookie_name;
		}
		if other.signups_disabled.is_some() {
			self.signups_disabled = other.signups_disabled;
		}
		if other.session_idle_timeout_secs.is_some() {
			self.session_idle_timeout_secs = other.session_idle_timeout_secs;
		}
		if other.max_sessions.is_some() {
			self.max_sessions = other.max_sessions;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			test_mode: self.test_mode.unwrap_or(false),
			environment: self
				.environment
				.unwrap_or_else(|| "development".to_string()),
			session_cookie_name: self
				.session_cookie_name
				.unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string()),
			signups_disabled: self.signups_disabled.unwrap_or(false),
			session_idle_timeout_secs: self
				.session_idle_timeout_secs
				.unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT_SECS),
			max_sessions: self.max_sessions.unwrap_or(DEFAULT_MAX_SESSIONS),
		}
	}
}
