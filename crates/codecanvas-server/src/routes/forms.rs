// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Service-request and rating submissions.
//!
//! Payloads are validated before anything else; an invalid payload gets a
//! 400 with per-field messages and never reaches the session registry or the
//! inbox.

use axum::{
	extract::{rejection::JsonRejection, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	Json,
};
use tracing::instrument;

use crate::{
	api::AppState,
	error::ServerError,
	locale_middleware::RequestLocale,
	routes::json_body,
	validation::{
		validate_service_rating, validate_service_request, FormResponse, ServiceRatingInput,
		ServiceRequestInput,
	},
};

fn invalid(response: FormResponse) -> Response {
	(StatusCode::BAD_REQUEST, Json(response)).into_response()
}

/// POST /api/service-requests
#[instrument(skip(state, payload))]
pub async fn submit_service_request(
	State(state): State<AppState>,
	locale: RequestLocale,
	payload: Result<Json<ServiceRequestInput>, JsonRejection>,
) -> Result<Response, ServerError> {
	let input = json_body(payload)?;
	let dictionary = state.dictionaries.get(locale.locale());

	let request = match validate_service_request(input, &dictionary) {
		Ok(request) => request,
		Err(errors) => {
			tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "service request rejected");
			return Ok(invalid(FormResponse::invalid(errors, &dictionary)));
		}
	};

	state.inbox.submit_request(request).await;

	Ok(Json(FormResponse::success(
		dictionary.text("requestSubmittedMessage"),
	))
	.into_response())
}

/// POST /api/ratings
///
/// The signed-in user must be the one named by `userId`.
#[instrument(skip(state, headers, payload))]
pub async fn submit_rating(
	State(state): State<AppState>,
	locale: RequestLocale,
	headers: HeaderMap,
	payload: Result<Json<ServiceRatingInput>, JsonRejection>,
) -> Result<Response, ServerError> {
	let input = json_body(payload)?;
	let dictionary = state.dictionaries.get(locale.locale());

	let rating = match validate_service_rating(input, &dictionary) {
		Ok(rating) => rating,
		Err(errors) => {
			tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "rating rejected");
			return Ok(invalid(FormResponse::invalid(errors, &dictionary)));
		}
	};

	let auth = state.sessions.auth_state(&headers).await;
	let user = auth.user.ok_or_else(|| {
		ServerError::Unauthorized(dictionary.text("toastAuthRequiredDescription").to_string())
	})?;
	if user.uid != rating.user_id {
		tracing::warn!(uid = %user.uid, claimed = %rating.user_id, "rating submitted for another user");
		return Err(ServerError::Forbidden(
			dictionary.text("toastRatingSubmitFailed").to_string(),
		));
	}

	if state.catalog.find_service(&rating.service_id).is_none() {
		return Err(ServerError::NotFound(
			dictionary.text("serviceNotFoundDescription").to_string(),
		));
	}

	state.inbox.submit_rating(rating).await;

	Ok(Json(FormResponse::success(
		dictionary.text("ratingSubmittedMessage"),
	))
	.into_response())
}
