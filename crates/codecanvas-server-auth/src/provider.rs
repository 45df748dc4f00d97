// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The identity provider boundary and an in-process implementation.
//!
//! An [`IdentityProvider`] handle represents one client's view of the provider:
//! it tracks that client's signed-in user and announces changes through a
//! `watch` channel. Accounts live in an [`AccountDirectory`] shared by all
//! handles.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use argon2::password_hash::{
	rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use async_trait::async_trait;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::argon2_config::argon2_instance;
use crate::error::{codes, ProviderError};
use crate::types::{OAuthAssertion, OAuthProvider, User, PASSWORD_PROVIDER_ID};

/// Minimum password length accepted by the provider.
pub const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
	/// The user currently signed in on this handle.
	fn current_user(&self) -> Option<User>;

	/// Observe sign-in and sign-out events. The receiver starts at the
	/// current value.
	fn subscribe(&self) -> watch::Receiver<Option<User>>;

	async fn sign_in_with_password(&self, email: &str, password: &str)
		-> Result<User, ProviderError>;

	async fn create_user_with_password(
		&self,
		email: &str,
		password: &str,
	) -> Result<User, ProviderError>;

	async fn sign_in_with_oauth(
		&self,
		provider: OAuthProvider,
		assertion: OAuthAssertion,
	) -> Result<User, ProviderError>;

	async fn sign_out(&self) -> Result<(), ProviderError>;
}

#[derive(Debug, Clone)]
struct Account {
	user: User,
	password_hash: Option<String>,
	providers: BTreeSet<String>,
}

/// Accounts known to the in-process provider, keyed by normalized email.
#[derive(Debug, Default)]
pub struct AccountDirectory {
	accounts: RwLock<HashMap<String, Account>>,
}

impl AccountDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn len(&self) -> usize {
		self.accounts.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.accounts.read().await.is_empty()
	}

	pub async fn find_by_email(&self, email: &str) -> Option<User> {
		let accounts = self.accounts.read().await;
		accounts.get(&normalize_email(email)).map(|a| a.user.clone())
	}
}

fn normalize_email(email: &str) -> String {
	email.trim().to_ascii_lowercase()
}

fn looks_like_email(email: &str) -> bool {
	match email.split_once('@') {
		Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
		None => false,
	}
}

fn hash_password(password: &str) -> Result<String, ProviderError> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| {
			warn!(error = %e, "password hashing failed");
			ProviderError::new(codes::INTERNAL_ERROR)
		})
}

fn verify_password(password: &str, hash: &str) -> bool {
	let parsed_hash = match PasswordHash::new(hash) {
		Ok(h) => h,
		Err(_) => return false,
	};
	argon2_instance()
		.verify_password(password.as_bytes(), &parsed_hash)
		.is_ok()
}

/// In-process identity provider with argon2 password hashes and
/// create-or-link federated sign-in.
pub struct InMemoryIdentityProvider {
	directory: Arc<AccountDirectory>,
	current: watch::Sender<Option<User>>,
}

impl InMemoryIdentityProvider {
	pub fn new(directory: Arc<AccountDirectory>) -> Self {
		let (current, _) = watch::channel(None);
		Self { directory, current }
	}

	pub fn directory(&self) -> &Arc<AccountDirectory> {
		&self.directory
	}

	fn announce(&self, user: Option<User>) {
		self.current.send_replace(user);
	}
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
	fn current_user(&self) -> Option<User> {
		self.current.borrow().clone()
	}

	fn subscribe(&self) -> watch::Receiver<Option<User>> {
		self.current.subscribe()
	}

	#[instrument(skip(self, password))]
	async fn sign_in_with_password(
		&self,
		email: &str,
		password: &str,
	) -> Result<User, ProviderError> {
		let account = {
			let accounts = self.directory.accounts.read().await;
			accounts.get(&normalize_email(email)).cloned()
		};

		let Some(account) = account else {
			debug!("no account for email");
			return Err(ProviderError::new(codes::USER_NOT_FOUND));
		};

		let Some(hash) = account.password_hash.as_deref() else {
			debug!(uid = %account.user.uid, "account has no password credential");
			return Err(ProviderError::new(codes::INVALID_CREDENTIAL));
		};

		if !verify_password(password, hash) {
			debug!(uid = %account.user.uid, "password mismatch");
			return Err(ProviderError::new(codes::WRONG_PASSWORD));
		}

		info!(uid = %account.user.uid, "password sign-in");
		self.announce(Some(account.user.clone()));
		Ok(account.user)
	}

	#[instrument(skip(self, password))]
	async fn create_user_with_password(
		&self,
		email: &str,
		password: &str,
	) -> Result<User, ProviderError> {
		let key = normalize_email(email);
		if !looks_like_email(&key) {
			return Err(ProviderError::new(codes::INVALID_EMAIL));
		}
		if password.chars().count() < MIN_PASSWORD_LEN {
			return Err(ProviderError::new(codes::WEAK_PASSWORD));
		}

		let password_hash = hash_password(password)?;

		let user = {
			let mut accounts = self.directory.accounts.write().await;
			if accounts.contains_key(&key) {
				return Err(ProviderError::new(codes::EMAIL_ALREADY_IN_USE));
			}

			let user = User {
				uid: Uuid::new_v4().simple().to_string(),
				display_name: None,
				email: Some(key.clone()),
				photo_url: None,
				provider_id: PASSWORD_PROVIDER_ID.to_string(),
			};
			accounts.insert(
				key,
				Account {
					user: user.clone(),
					password_hash: Some(password_hash),
					providers: BTreeSet::from([PASSWORD_PROVIDER_ID.to_string()]),
				},
			);
			user
		};

		info!(uid = %user.uid, "account created");
		self.announce(Some(user.clone()));
		Ok(user)
	}

	#[instrument(skip(self, assertion))]
	async fn sign_in_with_oauth(
		&self,
		provider: OAuthProvider,
		assertion: OAuthAssertion,
	) -> Result<User, ProviderError> {
		let key = normalize_email(&assertion.email);
		if assertion.subject.trim().is_empty() || !looks_like_email(&key) {
			return Err(ProviderError::new(codes::INVALID_CREDENTIAL));
		}

		let user = {
			let mut accounts = self.directory.accounts.write().await;
			match accounts.get(&key) {
				Some(account) if account.providers.contains(provider.provider_id()) => {
					account.user.clone()
				}
				Some(_) => {
					info!("email registered with a different sign-in method");
					return Err(ProviderError::new(
						codes::ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL,
					));
				}
				None => {
					let user = User {
						uid: Uuid::new_v4().simple().to_string(),
						display_name: assertion.display_name,
						email: Some(key.clone()),
						photo_url: assertion.photo_url,
						provider_id: provider.provider_id().to_string(),
					};
					accounts.insert(
						key,
						Account {
							user: user.clone(),
							password_hash: None,
							providers: BTreeSet::from([provider.provider_id().to_string()]),
						},
					);
					info!(uid = %user.uid, "account created from federated identity");
					user
				}
			}
		};

		self.announce(Some(user.clone()));
		Ok(user)
	}

	async fn sign_out(&self) -> Result<(), ProviderError> {
		self.announce(None);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn provider() -> InMemoryIdentityProvider {
		InMemoryIdentityProvider::new(Arc::new(AccountDirectory::new()))
	}

	fn assertion(email: &str) -> OAuthAssertion {
		OAuthAssertion {
			subject: "subject-1".to_string(),
			email: email.to_string(),
			display_name: Some("Octo Cat".to_string()),
			photo_url: None,
		}
	}

	#[tokio::test]
	async fn test_create_then_sign_in() {
		let provider = provider();
		let created = provider
			.create_user_with_password("Alice@Example.com", "secret1")
			.await
			.unwrap();
		assert_eq!(created.email.as_deref(), Some("alice@example.com"));
		assert_eq!(created.provider_id, PASSWORD_PROVIDER_ID);

		provider.sign_out().await.unwrap();
		assert!(provider.current_user().is_none());

		let signed_in = provider
			.sign_in_with_password("alice@example.com", "secret1")
			.await
			.unwrap();
		assert_eq!(signed_in.uid, created.uid);
		assert_eq!(provider.current_user(), Some(signed_in));
	}

	#[tokio::test]
	async fn test_password_failures() {
		let provider = provider();
		provider
			.create_user_with_password("bob@example.com", "secret1")
			.await
			.unwrap();

		let err = provider
			.sign_in_with_password("bob@example.com", "wrong-pw")
			.await
			.unwrap_err();
		assert_eq!(err.code, codes::WRONG_PASSWORD);

		let err = provider
			.sign_in_with_password("nobody@example.com", "secret1")
			.await
			.unwrap_err();
		assert_eq!(err.code, codes::USER_NOT_FOUND);
	}

	#[tokio::test]
	async fn test_duplicate_signup_rejected() {
		let provider = provider();
		provider
			.create_user_with_password("carol@example.com", "secret1")
			.await
			.unwrap();
		let err = provider
			.create_user_with_password(" CAROL@example.com ", "secret2")
			.await
			.unwrap_err();
		assert_eq!(err.code, codes::EMAIL_ALREADY_IN_USE);
	}

	#[tokio::test]
	async fn test_signup_input_checks() {
		let provider = provider();
		let err = provider
			.create_user_with_password("not-an-email", "secret1")
			.await
			.unwrap_err();
		assert_eq!(err.code, codes::INVALID_EMAIL);

		let err = provider
			.create_user_with_password("dave@example.com", "12345")
			.await
			.unwrap_err();
		assert_eq!(err.code, codes::WEAK_PASSWORD);
		assert!(provider.directory().is_empty().await);
	}

	#[tokio::test]
	async fn test_oauth_creates_then_reuses_account() {
		let provider = provider();
		let first = provider
			.sign_in_with_oauth(OAuthProvider::GitHub, assertion("octo@example.com"))
			.await
			.unwrap();
		assert_eq!(first.provider_id, "github.com");
		assert_eq!(first.display_name.as_deref(), Some("Octo Cat"));

		let second = provider
			.sign_in_with_oauth(OAuthProvider::GitHub, assertion("octo@example.com"))
			.await
			.unwrap();
		assert_eq!(first.uid, second.uid);
		assert_eq!(provider.directory().len().await, 1);
	}

	#[tokio::test]
	async fn test_oauth_with_different_credential() {
		let provider = provider();
		provider
			.create_user_with_password("erin@example.com", "secret1")
			.await
			.unwrap();

		let err = provider
			.sign_in_with_oauth(OAuthProvider::Google, assertion("erin@example.com"))
			.await
			.unwrap_err();
		assert_eq!(err.code, codes::ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL);

		let err = provider
			.sign_in_with_password("octo@example.com", "secret1")
			.await
			.unwrap_err();
		assert_eq!(err.code, codes::USER_NOT_FOUND);
	}

	#[tokio::test]
	async fn test_oauth_only_account_has_no_password() {
		let provider = provider();
		provider
			.sign_in_with_oauth(OAuthProvider::Google, assertion("gina@example.com"))
			.await
			.unwrap();
		let err = provider
			.sign_in_with_password("gina@example.com", "anything")
			.await
			.unwrap_err();
		assert_eq!(err.code, codes::INVALID_CREDENTIAL);
	}

	#[tokio::test]
	async fn test_subscribers_see_changes() {
		let provider = provider();
		let mut rx = provider.subscribe();
		assert!(rx.borrow_and_update().is_none());

		provider
			.create_user_with_password("hal@example.com", "secret1")
			.await
			.unwrap();
		rx.changed().await.unwrap();
		assert!(rx.borrow_and_update().is_some());

		provider.sign_out().await.unwrap();
		rx.changed().await.unwrap();
		assert!(rx.borrow().is_none());
	}

	#[tokio::test]
	async fn test_handles_share_directory_but_not_session() {
		let directory = Arc::new(AccountDirectory::new());
		let a = InMemoryIdentityProvider::new(Arc::clone(&directory));
		let b = InMemoryIdentityProvider::new(Arc::clone(&directory));

		a.create_user_with_password("ivy@example.com", "secret1")
			.await
			.unwrap();
		assert!(a.current_user().is_some());
		assert!(b.current_user().is_none());
		assert!(directory.find_by_email("IVY@example.com").await.is_some());

		b.sign_in_with_password("ivy@example.com", "secret1")
			.await
			.unwrap();
		assert!(b.current_user().is_some());
	}

	#[test]
	fn test_hash_produces_argon2_format() {
		let hash = hash_password("secret1").unwrap();
		assert!(hash.starts_with("$argon2"));
		assert!(verify_password("secret1", &hash));
		assert!(!verify_password("secret2", &hash));
		assert!(!verify_password("secret1", "not-a-hash"));
	}
}
