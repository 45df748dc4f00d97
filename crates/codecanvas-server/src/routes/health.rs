// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health check handler.

use std::path::Path;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use codecanvas_common_i18n::check_key_parity;
use serde::Serialize;

use crate::api::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Degraded,
	Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
	pub status: HealthStatus,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

impl ComponentHealth {
	fn healthy() -> Self {
		Self {
			status: HealthStatus::Healthy,
			message: None,
		}
	}

	fn with(status: HealthStatus, message: impl Into<String>) -> Self {
		Self {
			status,
			message: Some(message.into()),
		}
	}
}

#[derive(Debug, Serialize)]
pub struct HealthComponents {
	pub dictionaries: ComponentHealth,
	pub assets: ComponentHealth,
	pub value_propositions: ComponentHealth,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub version: &'static str,
	pub components: HealthComponents,
}

fn check_dictionaries() -> ComponentHealth {
	match check_key_parity() {
		Ok(()) => ComponentHealth::healthy(),
		Err(e) => ComponentHealth::with(HealthStatus::Degraded, e.to_string()),
	}
}

fn check_assets(dir: &str) -> ComponentHealth {
	if Path::new(dir).is_dir() {
		ComponentHealth::healthy()
	} else {
		ComponentHealth::with(HealthStatus::Degraded, format!("assets directory {dir} not found"))
	}
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let components = HealthComponents {
		dictionaries: check_dictionaries(),
		assets: check_assets(&state.config.http.assets_dir),
		value_propositions: ComponentHealth::with(HealthStatus::Healthy, state.value_props.name()),
	};

	let statuses = [
		components.dictionaries.status,
		components.assets.status,
		components.value_propositions.status,
	];
	let status = if statuses.contains(&HealthStatus::Unhealthy) {
		HealthStatus::Unhealthy
	} else if statuses.contains(&HealthStatus::Degraded) {
		HealthStatus::Degraded
	} else {
		HealthStatus::Healthy
	};

	let code = match status {
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
		_ => StatusCode::OK,
	};

	(
		code,
		Json(HealthResponse {
			status,
			version: env!("CARGO_PKG_VERSION"),
			components,
		}),
	)
}
