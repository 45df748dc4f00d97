// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! On-demand dictionary fetches for interactive clients.

use axum::{
	extract::{Path, State},
	http::header::CONTENT_LANGUAGE,
	response::IntoResponse,
	Json,
};

use crate::api::AppState;

/// GET /api/dictionaries/{code}
///
/// Unsupported codes get the default locale's dictionary; `Content-Language`
/// names the locale actually served.
pub async fn get_dictionary(
	State(state): State<AppState>,
	Path(code): Path<String>,
) -> impl IntoResponse {
	let dictionary = state.dictionaries.fetch(&code).await;
	(
		[(CONTENT_LANGUAGE, dictionary.locale().code())],
		Json(dictionary.as_ref().clone()),
	)
}
