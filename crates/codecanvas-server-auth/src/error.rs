// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity-provider failures and their user-facing classification.

use codecanvas_common_i18n::Dictionary;
use serde::Serialize;
use thiserror::Error;

/// Error codes reported by the identity provider.
pub mod codes {
	pub const USER_NOT_FOUND: &str = "auth/user-not-found";
	pub const WRONG_PASSWORD: &str = "auth/wrong-password";
	pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
	pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
	pub const ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL: &str =
		"auth/account-exists-with-different-credential";
	pub const INVALID_EMAIL: &str = "auth/invalid-email";
	pub const WEAK_PASSWORD: &str = "auth/weak-password";
	pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
	pub const INTERNAL_ERROR: &str = "auth/internal-error";
}

/// A failure reported by the identity provider, identified by its code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identity provider error: {code}")]
pub struct ProviderError {
	pub code: String,
}

impl ProviderError {
	pub fn new(code: impl Into<String>) -> Self {
		Self { code: code.into() }
	}

	pub fn kind(&self) -> AuthErrorKind {
		AuthErrorKind::from_code(&self.code)
	}
}

/// User-facing classes of provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
	InvalidCredentials,
	EmailAlreadyInUse,
	AccountExistsWithDifferentCredential,
	InvalidEmail,
	WeakPassword,
	Unknown,
}

impl AuthErrorKind {
	/// Classify a provider error code. Unrecognized codes are `Unknown`.
	pub fn from_code(code: &str) -> Self {
		match code {
			codes::USER_NOT_FOUND | codes::WRONG_PASSWORD | codes::INVALID_CREDENTIAL => {
				AuthErrorKind::InvalidCredentials
			}
			codes::EMAIL_ALREADY_IN_USE => AuthErrorKind::EmailAlreadyInUse,
			codes::ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL => {
				AuthErrorKind::AccountExistsWithDifferentCredential
			}
			codes::INVALID_EMAIL => AuthErrorKind::InvalidEmail,
			codes::WEAK_PASSWORD => AuthErrorKind::WeakPassword,
			_ => AuthErrorKind::Unknown,
		}
	}

	/// Dictionary key holding the localized description.
	pub fn message_key(&self) -> &'static str {
		match self {
			AuthErrorKind::InvalidCredentials => "toastInvalidEmailPassword",
			AuthErrorKind::EmailAlreadyInUse => "toastEmailInUse",
			AuthErrorKind::AccountExistsWithDifferentCredential => {
				"toastAccountExistsDifferentCredential"
			}
			AuthErrorKind::InvalidEmail => "validationEmailInvalid",
			AuthErrorKind::WeakPassword => "validationPasswordMin",
			AuthErrorKind::Unknown => "toastUnexpectedError",
		}
	}
}

/// The operation a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
	SignIn,
	SignUp,
	OAuthSignIn,
	SignOut,
}

impl AuthAction {
	pub fn failure_title_key(&self) -> &'static str {
		match self {
			AuthAction::SignIn => "toastLoginFailedTitle",
			AuthAction::SignUp => "toastSignupFailedTitle",
			AuthAction::OAuthSignIn => "toastSignInFailedTitle",
			AuthAction::SignOut => "toastLogoutFailedTitle",
		}
	}
}

/// Localized notification payload shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthNotice {
	pub title: String,
	pub description: String,
}

impl AuthNotice {
	pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
		}
	}

	/// Build the failure notice for `action` in the dictionary's language.
	pub fn failure(action: AuthAction, kind: AuthErrorKind, dictionary: &Dictionary) -> Self {
		Self::new(
			dictionary.text(action.failure_title_key()),
			dictionary.text(kind.message_key()),
		)
	}
}

/// Errors returned by auth store operations.
#[derive(Debug, Error)]
pub enum AuthError {
	#[error(transparent)]
	Provider(#[from] ProviderError),

	#[error("sign-up is disabled")]
	SignupsDisabled,
}

impl AuthError {
	pub fn kind(&self) -> AuthErrorKind {
		match self {
			AuthError::Provider(e) => e.kind(),
			AuthError::SignupsDisabled => AuthErrorKind::Unknown,
		}
	}
}
