// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Service-request handling configuration.

use serde::Deserialize;

fn default_recipient() -> String {
	"your-team@example.com".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestsConfig {
	/// Address that receives submitted service requests.
	pub recipient_email: String,
}

impl Default for RequestsConfig {
	fn default() -> Self {
		Self {
			recipient_email: default_recipient(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestsConfigLayer {
	#[serde(default)]
	pub recipient_email: Option<String>,
}

impl RequestsConfigLayer {
	pub fn merge(&mut self, other: RequestsConfigLayer) {
		if other.recipient_email.is_some() {
			self.recipient_email = other.recipient_email;
		}
	}

	pub fn finalize(self) -> RequestsConfig {
		RequestsConfig {
			recipient_email: self.recipient_email.unwrap_or_else(default_recipient),
		}
	}
}
