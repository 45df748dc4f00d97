// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication for CodeCanvas.
//!
//! This crate provides:
//! - The [`IdentityProvider`] boundary and an in-process implementation
//! - Classification of provider error codes into [`AuthErrorKind`]
//! - [`AuthStore`], one per client session, publishing [`AuthState`]
//! - [`RouteGuard`] for dashboard pages
//!
//! # Security Considerations
//!
//! - Passwords are stored as Argon2 hashes, never plaintext
//! - Test mode exposes a mock administrator and must stay off in production

mod argon2_config;
pub mod error;
pub mod guard;
pub mod provider;
pub mod store;
pub mod types;

pub use error::{codes, AuthAction, AuthError, AuthErrorKind, AuthNotice, ProviderError};
pub use guard::{GuardDecision, RouteGuard};
pub use provider::{AccountDirectory, IdentityProvider, InMemoryIdentityProvider, MIN_PASSWORD_LEN};
pub use store::{AuthStore, AuthStoreOptions};
pub use types::{
	AuthState, OAuthAssertion, OAuthProvider, User, PASSWORD_PROVIDER_ID, TEST_MODE_PROVIDER_ID,
};
