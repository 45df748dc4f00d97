// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Locale routing middleware.
//!
//! Every page lives under `/<locale>/...`. Requests without a supported
//! locale prefix are redirected (307) to the same path and query under the
//! locale negotiated from `Accept-Language`. API routes, health checks and
//! static files are never redirected; they still receive a negotiated
//! [`RequestLocale`] so JSON messages come back in the caller's language.
//!
//! # Usage
//!
//! ```ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let app = Router::new()
//!     .route("/{lang}", get(home))
//!     .layer(from_fn_with_state(state.clone(), locale_layer));
//! ```

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{header::ACCEPT_LANGUAGE, request::Parts, HeaderMap, Request, StatusCode},
	middleware::Next,
	response::{IntoResponse, Redirect, Response},
};
use codecanvas_common_i18n::{
	negotiate, resolve_request, split_locale_prefix, Locale, Resolution, DEFAULT_LOCALE,
};
use std::convert::Infallible;
use tracing::instrument;

use crate::api::AppState;

/// The locale a request is served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

impl RequestLocale {
	pub fn locale(&self) -> Locale {
		self.0
	}
}

fn accept_language(headers: &HeaderMap) -> Option<&str> {
	headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok())
}

#[instrument(
	name = "locale_layer",
	skip(state, request, next),
	fields(
		path = %request.uri().path(),
		locale = tracing::field::Empty,
	)
)]
pub async fn locale_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	let span = tracing::Span::current();
	let path = request.uri().path().to_string();
	let query = request.uri().query().map(str::to_string);
	let header = accept_language(request.headers()).map(str::to_string);

	let locale = match resolve_request(
		&path,
		query.as_deref(),
		header.as_deref(),
		state.default_locale,
	) {
		Resolution::Bypass => negotiate(header.as_deref(), state.default_locale),
		Resolution::Resolved(locale) => locale,
		Resolution::Redirect { locale, location } => {
			span.record("locale", locale.code());
			tracing::debug!(%location, "redirecting to localized path");
			return Redirect::temporary(&location).into_response();
		}
	};

	span.record("locale", locale.code());
	request.extensions_mut().insert(RequestLocale(locale));
	next.run(request).await
}

/// Route layer for page routes.
///
/// `/{lang}` also matches bypassed paths such as `/logo.svg`; those are not
/// pages.
pub async fn require_locale_prefix(request: Request<Body>, next: Next) -> Response {
	if split_locale_prefix(request.uri().path()).is_none() {
		return StatusCode::NOT_FOUND.into_response();
	}
	next.run(request).await
}

impl<S> FromRequestParts<S> for RequestLocale
where
	S: Send + Sync,
{
	type Rejection = Infallible;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(locale) = parts.extensions.get::<RequestLocale>() {
			return Ok(*locale);
		}
		Ok(RequestLocale(negotiate(
			accept_language(&parts.headers),
			DEFAULT_LOCALE,
		)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::http::HeaderValue;

	#[tokio::test]
	async fn test_extractor_prefers_extension() {
		let (mut parts, _) = Request::builder()
			.uri("/api/ratings")
			.header(ACCEPT_LANGUAGE, "en")
			.body(())
			.unwrap()
			.into_parts();
		parts.extensions.insert(RequestLocale(Locale::Ar));

		let locale = RequestLocale::from_request_parts(&mut parts, &()).await.unwrap();
		assert_eq!(locale.locale(), Locale::Ar);
	}

	#[tokio::test]
	async fn test_extractor_falls_back_to_header() {
		let (mut parts, _) = Request::builder()
			.uri("/api/ratings")
			.body(())
			.unwrap()
			.into_parts();
		parts
			.headers
			.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ar-EG,en;q=0.5"));

		let locale = RequestLocale::from_request_parts(&mut parts, &()).await.unwrap();
		assert_eq!(locale.locale(), Locale::Ar);
	}
}
