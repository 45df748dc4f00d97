// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-client auth state.
//!
//! An [`AuthStore`] wraps one [`IdentityProvider`] handle, forwards its user
//! events into an [`AuthState`] watch channel and owns the sign-in/sign-out
//! flows together with their post-auth navigation targets.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use codecanvas_common_i18n::{localized_href, Locale};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::types::{AuthState, OAuthAssertion, OAuthProvider, User};

/// Behaviour switches applied to every store.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthStoreOptions {
	/// Expose a mock administrator while nobody is signed in.
	pub test_mode: bool,
	/// Reject new password accounts.
	pub signups_disabled: bool,
}

struct Shared {
	state: watch::Sender<AuthState>,
	mock_admin: AtomicBool,
}

impl Shared {
	fn publish(&self, user: Option<User>) {
		let user = match user {
			Some(user) => Some(user),
			None if self.mock_admin.load(Ordering::Acquire) => Some(User::test_mode_admin()),
			None => None,
		};
		self.state.send_replace(AuthState {
			user,
			loading: false,
		});
	}
}

pub struct AuthStore {
	provider: Arc<dyn IdentityProvider>,
	shared: Arc<Shared>,
	options: AuthStoreOptions,
}

impl AuthStore {
	/// Create a store and start forwarding provider events.
	///
	/// The state reports `loading` until the provider's first emission has
	/// been observed. Must be called from within a tokio runtime.
	pub fn new(provider: Arc<dyn IdentityProvider>, options: AuthStoreOptions) -> Self {
		let (state, _) = watch::channel(AuthState::loading());
		let shared = Arc::new(Shared {
			state,
			mock_admin: AtomicBool::new(options.test_mode),
		});

		let mut events = provider.subscribe();
		let forward = Arc::clone(&shared);
		tokio::spawn(async move {
			loop {
				let user = events.borrow_and_update().clone();
				forward.publish(user);
				if events.changed().await.is_err() {
					debug!("identity provider closed; auth state forwarding stopped");
					break;
				}
			}
		});

		Self {
			provider,
			shared,
			options,
		}
	}

	pub fn options(&self) -> AuthStoreOptions {
		self.options
	}

	pub fn state(&self) -> AuthState {
		self.shared.state.borrow().clone()
	}

	pub fn current_user(&self) -> Option<User> {
		self.shared.state.borrow().user.clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<AuthState> {
		self.shared.state.subscribe()
	}

	/// Wait until the first provider emission has been applied.
	pub async fn ready(&self) -> AuthState {
		let mut rx = self.subscribe();
		let settled = match rx.wait_for(|state| !state.loading).await {
			Ok(state) => state.clone(),
			Err(_) => self.state(),
		};
		settled
	}

	/// Sign in with email and password; returns the dashboard path for `lang`.
	#[instrument(skip(self, password))]
	pub async fn sign_in_with_password(
		&self,
		email: &str,
		password: &str,
		lang: Locale,
	) -> Result<String, AuthError> {
		let user = self.provider.sign_in_with_password(email, password).await?;
		info!(uid = %user.uid, "signed in");
		self.shared.publish(Some(user));
		Ok(localized_href(lang, "dashboard"))
	}

	/// Create an account and sign it in; returns the dashboard path for `lang`.
	#[instrument(skip(self, password))]
	pub async fn sign_up(
		&self,
		email: &str,
		password: &str,
		lang: Locale,
	) -> Result<String, AuthError> {
		if self.options.signups_disabled {
			return Err(AuthError::SignupsDisabled);
		}
		let user = self.provider.create_user_with_password(email, password).await?;
		info!(uid = %user.uid, "signed up");
		self.shared.publish(Some(user));
		Ok(localized_href(lang, "dashboard"))
	}

	#[instrument(skip(self, assertion))]
	pub async fn sign_in_with_oauth(
		&self,
		provider: OAuthProvider,
		assertion: OAuthAssertion,
		lang: Locale,
	) -> Result<String, AuthError> {
		let user = self.provider.sign_in_with_oauth(provider, assertion).await?;
		info!(uid = %user.uid, "signed in with federated identity");
		self.shared.publish(Some(user));
		Ok(localized_href(lang, "dashboard"))
	}

	/// Sign out; returns the login path for `lang`.
	///
	/// In test mode only the local state is cleared.
	#[instrument(skip(self))]
	pub async fn sign_out(&self, lang: Locale) -> Result<String, AuthError> {
		if self.options.test_mode {
			self.shared.mock_admin.store(false, Ordering::Release);
			self.shared.publish(None);
			info!("test mode sign-out");
			return Ok(localized_href(lang, "login"));
		}

		self.provider.sign_out().await?;
		self.shared.publish(None);
		info!("signed out");
		Ok(localized_href(lang, "login"))
	}
}
