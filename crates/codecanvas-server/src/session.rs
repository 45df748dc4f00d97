// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client sessions.
//!
//! Each browser gets an opaque session cookie mapped to its own
//! [`AuthStore`]. Stores share one account directory, so signing in from one
//! session does not affect any other.
//!
//! A session is only registered once it carries state worth keeping (a
//! successful sign-in or sign-up, or a test-mode sign-out). Registered
//! sessions expire after an idle timeout, and the registry never holds more
//! than `max_sessions`; the least recently used session goes first.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};
use codecanvas_server_auth::{
	AccountDirectory, AuthState, AuthStore, AuthStoreOptions, InMemoryIdentityProvider, User,
};
use codecanvas_server_config::AuthConfig;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// How often the background sweeper looks for idle sessions.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// A resolved client session.
#[derive(Clone)]
pub struct ClientSession {
	pub id: String,
	pub store: Arc<AuthStore>,
	/// Not yet registered; the cookie must be set once it is.
	pub is_new: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
	pub idle_timeout: Duration,
	pub max_sessions: usize,
}

impl SessionLimits {
	pub fn from_config(config: &AuthConfig) -> Self {
		Self {
			idle_timeout: Duration::from_secs(config.session_idle_timeout_secs),
			max_sessions: config.max_sessions,
		}
	}
}

impl Default for SessionLimits {
	fn default() -> Self {
		Self::from_config(&AuthConfig::default())
	}
}

struct Entry {
	store: Arc<AuthStore>,
	last_seen: Instant,
}

pub struct SessionRegistry {
	cookie_name: String,
	secure_cookies: bool,
	directory: Arc<AccountDirectory>,
	options: AuthStoreOptions,
	limits: SessionLimits,
	sessions: RwLock<HashMap<String, Entry>>,
}

impl SessionRegistry {
	pub fn new(
		cookie_name: impl Into<String>,
		secure_cookies: bool,
		directory: Arc<AccountDirectory>,
		options: AuthStoreOptions,
		limits: SessionLimits,
	) -> Self {
		Self {
			cookie_name: cookie_name.into(),
			secure_cookies,
			directory,
			options,
			limits,
			sessions: RwLock::new(HashMap::new()),
		}
	}

	pub fn cookie_name(&self) -> &str {
		&self.cookie_name
	}

	pub fn directory(&self) -> &Arc<AccountDirectory> {
		&self.directory
	}

	pub fn options(&self) -> AuthStoreOptions {
		self.options
	}

	pub fn limits(&self) -> SessionLimits {
		self.limits
	}

	pub async fn len(&self) -> usize {
		self.sessions.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.sessions.read().await.is_empty()
	}

	fn is_idle(&self, entry: &Entry, now: Instant) -> bool {
		now.saturating_duration_since(entry.last_seen) > self.limits.idle_timeout
	}

	/// Look up the session named by the request's cookie and mark it used.
	///
	/// An idle session found here is evicted and reported as missing.
	pub async fn find(&self, headers: &HeaderMap) -> Option<ClientSession> {
		let id = extract_session_cookie_with_name(headers, &self.cookie_name)?;
		let now = Instant::now();
		let mut sessions = self.sessions.write().await;

		let entry = sessions.get_mut(&id)?;
		if self.is_idle(entry, now) {
			sessions.remove(&id);
			tracing::debug!(session_id = %id, "evicted idle session on lookup");
			return None;
		}
		entry.last_seen = now;

		Some(ClientSession {
			id,
			store: Arc::clone(&entry.store),
			is_new: false,
		})
	}

	/// Start a session that is not registered yet.
	pub async fn start(&self) -> ClientSession {
		let provider = Arc::new(InMemoryIdentityProvider::new(Arc::clone(&self.directory)));
		let store = Arc::new(AuthStore::new(provider, self.options));
		store.ready().await;

		ClientSession {
			id: Uuid::new_v4().to_string(),
			store,
			is_new: true,
		}
	}

	/// The request's registered session, or a fresh unregistered one.
	pub async fn find_or_start(&self, headers: &HeaderMap) -> ClientSession {
		match self.find(headers).await {
			Some(session) => session,
			None => self.start().await,
		}
	}

	/// Register a session started by [`Self::start`]. Registered sessions
	/// are left alone.
	pub async fn register(&self, session: &ClientSession) {
		if !session.is_new {
			return;
		}

		let now = Instant::now();
		let mut sessions = self.sessions.write().await;
		sessions.retain(|_, entry| !self.is_idle(entry, now));

		while sessions.len() >= self.limits.max_sessions {
			let oldest = sessions
				.iter()
				.min_by_key(|(_, entry)| entry.last_seen)
				.map(|(id, _)| id.clone());
			match oldest {
				Some(id) => {
					sessions.remove(&id);
					tracing::debug!(session_id = %id, "evicted least recently used session");
				}
				None => break,
			}
		}

		sessions.insert(
			session.id.clone(),
			Entry {
				store: Arc::clone(&session.store),
				last_seen: now,
			},
		);
		tracing::debug!(session_id = %session.id, live = sessions.len(), "registered client session");
	}

	pub async fn remove(&self, id: &str) -> bool {
		self.sessions.write().await.remove(id).is_some()
	}

	/// Drop every idle session; returns how many were removed.
	pub async fn evict_idle(&self) -> usize {
		let now = Instant::now();
		let mut sessions = self.sessions.write().await;
		let before = sessions.len();
		sessions.retain(|_, entry| !self.is_idle(entry, now));
		before - sessions.len()
	}

	/// Periodically evict idle sessions for the lifetime of the runtime.
	pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
		tokio::spawn(async move {
			let mut ticker = tokio::time::interval(every);
			loop {
				ticker.tick().await;
				let evicted = self.evict_idle().await;
				if evicted > 0 {
					tracing::info!(evicted, "evicted idle sessions");
				}
			}
		})
	}

	/// Settled auth state for the request.
	///
	/// Requests without a session see the test-mode administrator when test
	/// mode is on and nobody otherwise.
	pub async fn auth_state(&self, headers: &HeaderMap) -> AuthState {
		match self.find(headers).await {
			Some(session) => session.store.ready().await,
			None if self.options.test_mode => AuthState::signed_in(User::test_mode_admin()),
			None => AuthState::signed_out(),
		}
	}

	pub fn session_cookie(&self, id: &str) -> Option<HeaderValue> {
		let secure = if self.secure_cookies { "; Secure" } else { "" };
		HeaderValue::from_str(&format!(
			"{}={id}; Path=/; HttpOnly; SameSite=Lax{secure}",
			self.cookie_name
		))
		.ok()
	}

	pub fn clear_cookie(&self) -> Option<HeaderValue> {
		let secure = if self.secure_cookies { "; Secure" } else { "" };
		HeaderValue::from_str(&format!(
			"{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax{secure}",
			self.cookie_name
		))
		.ok()
	}
}

/// Extract a cookie value from the Cookie header.
pub fn extract_session_cookie_with_name(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	headers
		.get(COOKIE)?
		.to_str()
		.ok()?
		.split(';')
		.find_map(|cookie| {
			let (name, value) = cookie.trim().split_once('=')?;
			(name == cookie_name && !value.is_empty()).then(|| value.to_string())
		})
}
