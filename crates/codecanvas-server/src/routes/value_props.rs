// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Copywriting helper endpoint.

use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
	api::AppState,
	error::ServerError,
	locale_middleware::RequestLocale,
	routes::json_body,
	validation::{validate_value_proposition, FormResponse, ValuePropositionInput},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePropositionResponse {
	pub value_propositions: String,
}

/// POST /api/value-propositions
#[instrument(skip(state, payload))]
pub async fn generate(
	State(state): State<AppState>,
	locale: RequestLocale,
	payload: Result<Json<ValuePropositionInput>, JsonRejection>,
) -> Result<Response, ServerError> {
	let input = json_body(payload)?;
	let dictionary = state.dictionaries.get(locale.locale());

	let technologies = match validate_value_proposition(input, &dictionary) {
		Ok(technologies) => technologies,
		Err(errors) => {
			return Ok((
				StatusCode::BAD_REQUEST,
				Json(FormResponse::invalid(errors, &dictionary)),
			)
				.into_response());
		}
	};

	let value_propositions = state
		.value_props
		.generate(&technologies, locale.locale())
		.await?;

	Ok(Json(ValuePropositionResponse { value_propositions }).into_response())
}
