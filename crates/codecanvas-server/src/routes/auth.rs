// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Auth endpoints backing the login and sign-up pages.
//!
//! Each browser session owns an [`AuthStore`]; these handlers drive it and
//! translate outcomes into localized notices plus a navigation target. A
//! session cookie is only issued once a sign-in or sign-up succeeds.
//!
//! [`AuthStore`]: codecanvas_server_auth::AuthStore

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::{header::SET_COOKIE, HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	Json,
};
use codecanvas_common_i18n::{localized_href, Dictionary};
use codecanvas_server_auth::{
	AuthAction, AuthError, AuthErrorKind, AuthNotice, AuthState, OAuthAssertion, OAuthProvider,
	User,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
	api::AppState,
	error::ServerError,
	locale_middleware::RequestLocale,
	routes::json_body,
	session::ClientSession,
	validation::{validate_login, validate_signup, FormResponse, LoginInput, SignupInput},
};

#[derive(Debug, Serialize)]
pub struct AuthSuccess {
	pub success: bool,
	pub redirect: String,
	pub notice: AuthNotice,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub struct AuthFailure {
	pub success: bool,
	pub error: AuthErrorKind,
	pub notice: AuthNotice,
}

fn failure_status(error: &AuthError) -> StatusCode {
	match error {
		AuthError::SignupsDisabled => StatusCode::FORBIDDEN,
		AuthError::Provider(_) => match error.kind() {
			AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
			AuthErrorKind::EmailAlreadyInUse
			| AuthErrorKind::AccountExistsWithDifferentCredential => StatusCode::CONFLICT,
			AuthErrorKind::InvalidEmail | AuthErrorKind::WeakPassword => StatusCode::BAD_REQUEST,
			AuthErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
		},
	}
}

fn failure(action: AuthAction, error: &AuthError, dictionary: &Dictionary) -> Response {
	let kind = error.kind();
	tracing::info!(?action, ?kind, error = %error, "auth action failed");
	(
		failure_status(error),
		Json(AuthFailure {
			success: false,
			error: kind,
			notice: AuthNotice::failure(action, kind, dictionary),
		}),
	)
		.into_response()
}

/// Register a session started by this request and attach its cookie.
async fn keep_session(state: &AppState, session: &ClientSession, mut response: Response) -> Response {
	if session.is_new {
		state.sessions.register(session).await;
		if let Some(cookie) = state.sessions.session_cookie(&session.id) {
			response.headers_mut().insert(SET_COOKIE, cookie);
		}
	}
	response
}

fn with_cleared_cookie(state: &AppState, mut response: Response) -> Response {
	if let Some(cookie) = state.sessions.clear_cookie() {
		response.headers_mut().insert(SET_COOKIE, cookie);
	}
	response
}

fn logged_out(redirect: String, dictionary: &Dictionary) -> Response {
	success(
		redirect,
		AuthNotice::new(
			dictionary.text("toastLogoutTitle"),
			dictionary.text("toastLogoutDescription"),
		),
		None,
	)
}

fn success(redirect: String, notice: AuthNotice, user: Option<User>) -> Response {
	Json(AuthSuccess {
		success: true,
		redirect,
		notice,
		user,
	})
	.into_response()
}

/// POST /api/auth/login
#[instrument(skip(state, headers, payload))]
pub async fn login(
	State(state): State<AppState>,
	locale: RequestLocale,
	headers: HeaderMap,
	payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Response, ServerError> {
	let input = json_body(payload)?;
	let dictionary = state.dictionaries.get(locale.locale());

	let credentials = match validate_login(input, &dictionary) {
		Ok(credentials) => credentials,
		Err(errors) => {
			return Ok((
				StatusCode::BAD_REQUEST,
				Json(FormResponse::invalid(errors, &dictionary)),
			)
				.into_response())
		}
	};

	let session = state.sessions.find_or_start(&headers).await;
	let response = match session
		.store
		.sign_in_with_password(&credentials.email, &credentials.password, locale.locale())
		.await
	{
		Ok(redirect) => success(
			redirect,
			AuthNotice::new(
				dictionary.text("toastLoginSuccessfulTitle"),
				dictionary.text("toastLoginSuccessfulDescription"),
			),
			session.store.current_user(),
		),
		Err(e) => return Ok(failure(AuthAction::SignIn, &e, &dictionary)),
	};

	Ok(keep_session(&state, &session, response).await)
}

/// POST /api/auth/signup
#[instrument(skip(state, headers, payload))]
pub async fn signup(
	State(state): State<AppState>,
	locale: RequestLocale,
	headers: HeaderMap,
	payload: Result<Json<SignupInput>, JsonRejection>,
) -> Result<Response, ServerError> {
	let input = json_body(payload)?;
	let dictionary = state.dictionaries.get(locale.locale());

	let credentials = match validate_signup(input, &dictionary) {
		Ok(credentials) => credentials,
		Err(errors) => {
			return Ok((
				StatusCode::BAD_REQUEST,
				Json(FormResponse::invalid(errors, &dictionary)),
			)
				.into_response())
		}
	};

	let session = state.sessions.find_or_start(&headers).await;
	let response = match session
		.store
		.sign_up(&credentials.email, &credentials.password, locale.locale())
		.await
	{
		Ok(redirect) => success(
			redirect,
			AuthNotice::new(
				dictionary.text("toastSignupSuccessfulTitle"),
				dictionary.text("toastLoginSuccessfulDescription"),
			),
			session.store.current_user(),
		),
		Err(e) => return Ok(failure(AuthAction::SignUp, &e, &dictionary)),
	};

	Ok(keep_session(&state, &session, response).await)
}

/// POST /api/auth/oauth/{provider}
///
/// The body carries the identity assertion returned by the provider's
/// consent flow.
#[instrument(skip(state, headers, payload))]
pub async fn oauth_sign_in(
	State(state): State<AppState>,
	locale: RequestLocale,
	Path(provider): Path<String>,
	headers: HeaderMap,
	payload: Result<Json<OAuthAssertion>, JsonRejection>,
) -> Result<Response, ServerError> {
	let dictionary = state.dictionaries.get(locale.locale());
	let provider: OAuthProvider = provider
		.parse()
		.map_err(|_| ServerError::NotFound(format!("unknown provider: {provider}")))?;
	let assertion = json_body(payload)?;

	let session = state.sessions.find_or_start(&headers).await;
	let response = match session
		.store
		.sign_in_with_oauth(provider, assertion, locale.locale())
		.await
	{
		Ok(redirect) => success(
			redirect,
			AuthNotice::new(
				dictionary.format(
					"toastSignInSuccessfulTitle",
					&[("provider", provider.display_name())],
				),
				dictionary.text("toastLoginSuccessfulDescription"),
			),
			session.store.current_user(),
		),
		Err(e) => return Ok(failure(AuthAction::OAuthSignIn, &e, &dictionary)),
	};

	Ok(keep_session(&state, &session, response).await)
}

/// POST /api/auth/logout
///
/// Signing out evicts the session. In test mode the session is kept (or
/// created) instead, so that hiding the mock administrator sticks.
#[instrument(skip(state, headers))]
pub async fn logout(
	State(state): State<AppState>,
	locale: RequestLocale,
	headers: HeaderMap,
) -> Result<Response, ServerError> {
	let dictionary = state.dictionaries.get(locale.locale());
	let test_mode = state.sessions.options().test_mode;

	let session = match state.sessions.find(&headers).await {
		Some(session) => session,
		None if test_mode => state.sessions.start().await,
		None => {
			let response = logged_out(localized_href(locale.locale(), "login"), &dictionary);
			return Ok(with_cleared_cookie(&state, response));
		}
	};

	let redirect = match session.store.sign_out(locale.locale()).await {
		Ok(redirect) => redirect,
		Err(e) => return Ok(failure(AuthAction::SignOut, &e, &dictionary)),
	};
	let response = logged_out(redirect, &dictionary);

	if test_mode {
		return Ok(keep_session(&state, &session, response).await);
	}
	state.sessions.remove(&session.id).await;
	Ok(with_cleared_cookie(&state, response))
}

/// GET /api/auth/session
pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<AuthState> {
	Json(state.sessions.auth_state(&headers).await)
}

#[cfg(test)]
mod tests {
	use super::*;
	use codecanvas_server_auth::{codes, ProviderError};

	#[test]
	fn test_failure_status() {
		let status = |code: &str| failure_status(&AuthError::Provider(ProviderError::new(code)));
		assert_eq!(status(codes::WRONG_PASSWORD), StatusCode::UNAUTHORIZED);
		assert_eq!(status(codes::USER_NOT_FOUND), StatusCode::UNAUTHORIZED);
		assert_eq!(status(codes::EMAIL_ALREADY_IN_USE), StatusCode::CONFLICT);
		assert_eq!(
			status(codes::ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL),
			StatusCode::CONFLICT
		);
		assert_eq!(status(codes::WEAK_PASSWORD), StatusCode::BAD_REQUEST);
		assert_eq!(status("auth/network-request-failed"), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(
			failure_status(&AuthError::SignupsDisabled),
			StatusCode::FORBIDDEN
		);
	}
}
