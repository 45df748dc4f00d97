// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Copywriting helper (text generation backend) configuration.

use std::fmt;

use serde::Deserialize;

fn default_model() -> String {
	"value-prop-generator".to_string()
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved text-generation configuration.
///
/// Without an endpoint the server falls back to offline template copy.
#[derive(Clone, PartialEq, Eq)]
pub struct AiConfig {
	pub endpoint: Option<String>,
	pub api_key: Option<String>,
	pub model: String,
	pub timeout_secs: u64,
}

impl fmt::Debug for AiConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AiConfig")
			.field("endpoint", &self.endpoint)
			.field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
			.field("model", &self.model)
			.field("timeout_secs", &self.timeout_secs)
			.finish()
	}
}

impl Default for AiConfig {
	fn default() -> Self {
		Self {
			endpoint: None,
			api_key: None,
			model: default_model(),
			timeout_secs: DEFAULT_TIMEOUT_SECS,
		}
	}
}

#[derive(Clone, Default, Deserialize)]
pub struct AiConfigLayer {
	#[serde(default)]
	pub endpoint: Option<String>,
	#[serde(default)]
	pub api_key: Option<String>,
	#[serde(default)]
	pub model: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl fmt::Debug for AiConfigLayer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AiConfigLayer")
			.field("endpoint", &self.endpoint)
			.field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
			.field("model", &self.model)
			.field("timeout_secs", &self.timeout_secs)
			.finish()
	}
}

impl AiConfigLayer {
	pub fn merge(&mut self, other: AiConfigLayer) {
		if other.endpoint.is_some() {
			self.endpoint = other.endpoint;
		}
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.model.is_some() {
			self.model = other.model;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> AiConfig {
		AiConfig {
			endpoint: self.endpoint,
			api_key: self.api_key,
			model: self.model.unwrap_or_else(default_model),
			timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
		}
	}
}
