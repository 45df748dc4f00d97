// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::sync::Arc;

use axum::{
	middleware::{from_fn, from_fn_with_state},
	routing::{get, post},
	Router,
};
use codecanvas_common_i18n::{check_key_parity, DictionaryLoader, Locale};
use codecanvas_server_auth::{AccountDirectory, AuthStoreOptions};
use codecanvas_server_config::ServerConfig;
use tower_http::services::ServeDir;

use crate::{
	catalog::Catalog,
	error::ServerError,
	inbox::SubmissionInbox,
	locale_middleware::{locale_layer, require_locale_prefix},
	routes,
	session::{SessionLimits, SessionRegistry},
	value_prop::{self, ValuePropositionGenerator},
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<ServerConfig>,
	pub dictionaries: DictionaryLoader,
	pub default_locale: Locale,
	pub sessions: Arc<SessionRegistry>,
	pub catalog: Catalog,
	pub inbox: Arc<SubmissionInbox>,
	pub value_props: Arc<dyn ValuePropositionGenerator>,
}

/// Creates the application state from configuration.
///
/// Fails when the locale dictionaries disagree on their key sets and
/// `i18n.strict_dictionaries` is on.
pub fn create_app_state(config: &ServerConfig) -> Result<AppState, ServerError> {
	let generator = value_prop::from_config(&config.ai)
		.map_err(|e| ServerError::Internal(format!("value proposition backend: {e}")))?;
	build_app_state(config, generator)
}

/// Creates the application state with an explicit value-proposition backend.
pub fn build_app_state(
	config: &ServerConfig,
	value_props: Arc<dyn ValuePropositionGenerator>,
) -> Result<AppState, ServerError> {
	match check_key_parity() {
		Ok(()) => {}
		Err(e) if config.i18n.strict_dictionaries => return Err(e.into()),
		Err(e) => tracing::warn!(error = %e, "locale dictionaries have drifted"),
	}

	let default_locale = config.i18n.default_locale;
	let options = AuthStoreOptions {
		test_mode: config.auth.test_mode,
		signups_disabled: config.auth.signups_disabled,
	};
	if options.test_mode {
		tracing::warn!("auth test mode is enabled; anonymous visitors see a mock administrator");
	}

	let sessions = SessionRegistry::new(
		config.auth.session_cookie_name.clone(),
		config.http.base_url.starts_with("https://"),
		Arc::new(AccountDirectory::new()),
		options,
		SessionLimits::from_config(&config.auth),
	);

	tracing::info!(
		default_locale = %default_locale,
		value_props = value_props.name(),
		recipient = %config.requests.recipient_email,
		"application state ready"
	);

	Ok(AppState {
		config: Arc::new(config.clone()),
		dictionaries: DictionaryLoader::new(default_locale),
		default_locale,
		sessions: Arc::new(sessions),
		catalog: Catalog::sample(),
		inbox: Arc::new(SubmissionInbox::new(config.requests.recipient_email.clone())),
		value_props,
	})
}

pub fn create_router(state: AppState) -> Router {
	let api = Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/api/service-requests",
			post(routes::forms::submit_service_request),
		)
		.route("/api/ratings", post(routes::forms::submit_rating))
		.route(
			"/api/value-propositions",
			post(routes::value_props::generate),
		)
		.route(
			"/api/dictionaries/{code}",
			get(routes::dictionaries::get_dictionary),
		)
		.route("/api/auth/login", post(routes::auth::login))
		.route("/api/auth/signup", post(routes::auth::signup))
		.route("/api/auth/logout", post(routes::auth::logout))
		.route(
			"/api/auth/oauth/{provider}",
			post(routes::auth::oauth_sign_in),
		)
		.route("/api/auth/session", get(routes::auth::session));

	let public_pages = Router::new()
		.route("/{lang}", get(routes::pages::home))
		.route("/{lang}/", get(routes::pages::home))
		.route("/{lang}/services", get(routes::pages::services))
		.route(
			"/{lang}/services/{service_id}",
			get(routes::pages::service_detail),
		)
		.route("/{lang}/about", get(routes::pages::about))
		.route("/{lang}/contact", get(routes::pages::contact))
		.route(
			"/{lang}/value-proposition",
			get(routes::pages::value_proposition),
		)
		.route("/{lang}/login", get(routes::pages::login))
		.route("/{lang}/signup", get(routes::pages::signup));

	let dashboard_pages = Router::new()
		.route("/{lang}/dashboard", get(routes::pages::dashboard))
		.route(
			"/{lang}/dashboard/{*section}",
			get(routes::pages::dashboard_section),
		)
		.route("/{lang}/chat", get(routes::pages::chat))
		.route("/{lang}/notifications", get(routes::pages::notifications))
		.route("/{lang}/profile", get(routes::pages::profile));

	let assets_dir = state.config.http.assets_dir.clone();

	Router::new()
		.merge(api)
		.merge(
			public_pages
				.merge(dashboard_pages)
				.route_layer(from_fn(require_locale_prefix)),
		)
		.nest_service("/_assets", ServeDir::new(assets_dir))
		.fallback(routes::pages::not_found)
		.layer(from_fn_with_state(state.clone(), locale_layer))
		.with_state(state)
}
