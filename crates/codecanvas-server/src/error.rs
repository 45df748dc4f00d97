// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use codecanvas_common_i18n::I18nError;
use serde::Serialize;

use crate::value_prop::GeneratorError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Resource not found.
	#[error("Not found: {0}")]
	NotFound(String),

	/// Invalid request payload.
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// Unauthorized (no signed-in user).
	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	/// Forbidden (signed-in user may not act on the resource).
	#[error("Forbidden: {0}")]
	Forbidden(String),

	/// Internal server error.
	#[error("Internal error: {0}")]
	Internal(String),

	/// Translation dictionaries failed their startup checks.
	#[error("Dictionary error: {0}")]
	Dictionary(#[from] I18nError),

	/// The value-proposition backend failed.
	#[error("Upstream error: {0}")]
	Upstream(#[from] GeneratorError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl ErrorResponse {
	fn new(error: &str, message: impl Into<String>) -> Self {
		Self {
			error: error.to_string(),
			message: message.into(),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, body) = match &self {
			ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new("not_found", msg)),
			ServerError::BadRequest(msg) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("bad_request", msg),
			),
			ServerError::Unauthorized(msg) => (
				StatusCode::UNAUTHORIZED,
				ErrorResponse::new("unauthorized", msg),
			),
			ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorResponse::new("forbidden", msg)),
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::Dictionary(e) => {
				tracing::error!(error = %e, "dictionary error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::Upstream(e) => {
				tracing::warn!(error = %e, "value proposition backend failed");
				let status = match e {
					GeneratorError::Timeout => StatusCode::GATEWAY_TIMEOUT,
					_ => StatusCode::BAD_GATEWAY,
				};
				(
					status,
					ErrorResponse::new("upstream_error", "The assistant is unavailable right now"),
				)
			}
		};

		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_codes() {
		assert_eq!(
			ServerError::NotFound("x".into()).into_response().status(),
			StatusCode::NOT_FOUND
		);
		assert_eq!(
			ServerError::Unauthorized("x".into()).into_response().status(),
			StatusCode::UNAUTHORIZED
		);
		assert_eq!(
			ServerError::Forbidden("x".into()).into_response().status(),
			StatusCode::FORBIDDEN
		);
		assert_eq!(
			ServerError::Upstream(GeneratorError::Timeout)
				.into_response()
				.status(),
			StatusCode::GATEWAY_TIMEOUT
		);
		assert_eq!(
			ServerError::Upstream(GeneratorError::ApiError {
				status: 500,
				message: "boom".into()
			})
			.into_response()
			.status(),
			StatusCode::BAD_GATEWAY
		);
	}
}
