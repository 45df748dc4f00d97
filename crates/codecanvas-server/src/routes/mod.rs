// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod auth;
pub mod dictionaries;
pub mod forms;
pub mod health;
pub mod pages;
pub mod value_props;

use axum::{extract::rejection::JsonRejection, Json};

use crate::error::ServerError;

/// Unwrap a JSON body, turning malformed payloads into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServerError> {
	match payload {
		Ok(Json(body)) => Ok(body),
		Err(rejection) => {
			tracing::debug!(error = %rejection, "rejected request body");
			Err(ServerError::BadRequest(rejection.body_text()))
		}
	}
}
