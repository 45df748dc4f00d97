// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity types shared between the provider, the store and the server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Provider id reported for email/password accounts.
pub const PASSWORD_PROVIDER_ID: &str = "password";

/// Provider id reported for the test-mode admin.
pub const TEST_MODE_PROVIDER_ID: &str = "test-mode";

/// A signed-in user as reported by the identity provider.
///
/// The application only reads these values; the provider owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub uid: String,
	pub display_name: Option<String>,
	pub email: Option<String>,
	#[serde(rename = "photoURL")]
	pub photo_url: Option<String>,
	pub provider_id: String,
}

impl User {
	/// The mock administrator exposed while auth test mode is on.
	pub fn test_mode_admin() -> Self {
		Self {
			uid: "test-admin-uid".to_string(),
			display_name: Some("Admin (Test Mode)".to_string()),
			email: Some("admin@gmail.com".to_string()),
			photo_url: None,
			provider_id: TEST_MODE_PROVIDER_ID.to_string(),
		}
	}

	/// Best label for greetings: display name, then email, then uid.
	pub fn label(&self) -> &str {
		self.display_name
			.as_deref()
			.or(self.email.as_deref())
			.unwrap_or(&self.uid)
	}
}

/// Federated sign-in providers offered on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
	Google,
	#[serde(rename = "github")]
	GitHub,
}

impl OAuthProvider {
	pub const ALL: [OAuthProvider; 2] = [OAuthProvider::Google, OAuthProvider::GitHub];

	/// URL slug used in `/api/auth/oauth/{provider}`.
	pub fn slug(&self) -> &'static str {
		match self {
			OAuthProvider::Google => "google",
			OAuthProvider::GitHub => "github",
		}
	}

	pub fn provider_id(&self) -> &'static str {
		match self {
			OAuthProvider::Google => "google.com",
			OAuthProvider::GitHub => "github.com",
		}
	}

	/// Human-readable name interpolated into sign-in notifications.
	pub fn display_name(&self) -> &'static str {
		match self {
			OAuthProvider::Google => "Google",
			OAuthProvider::GitHub => "GitHub",
		}
	}
}

impl fmt::Display for OAuthProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.slug())
	}
}

impl FromStr for OAuthProvider {
	type Err = ProviderError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"google" => Ok(OAuthProvider::Google),
			"github" => Ok(OAuthProvider::GitHub),
			_ => Err(ProviderError::new(crate::error::codes::OPERATION_NOT_ALLOWED)),
		}
	}
}

/// Identity asserted by a federated provider after its popup flow completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthAssertion {
	pub subject: String,
	pub email: String,
	#[serde(default)]
	pub display_name: Option<String>,
	#[serde(default, rename = "photoURL")]
	pub photo_url: Option<String>,
}

/// Auth state observed by pages and guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthState {
	pub user: Option<User>,
	pub loading: bool,
}

impl AuthState {
	/// Initial state before the provider has reported anything.
	pub fn loading() -> Self {
		Self {
			user: None,
			loading: true,
		}
	}

	pub fn signed_in(user: User) -> Self {
		Self {
			user: Some(user),
			loading: false,
		}
	}

	pub fn signed_out() -> Self {
		Self {
			user: None,
			loading: false,
		}
	}

	pub fn is_signed_in(&self) -> bool {
		self.user.is_some()
	}
}

impl Default for AuthState {
	fn default() -> Self {
		Self::loading()
	}
}
