// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Value-proposition generation for the "Why choose us" helper.
//!
//! Given the technologies of a client's project idea, a generator returns
//! reasons why the client might prefer this team. [`HttpGenerator`] delegates
//! to a configured model endpoint; [`TemplateGenerator`] produces fixed,
//! localized copy when no endpoint is configured.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use codecanvas_common_i18n::Locale;
use codecanvas_server_config::AiConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

#[derive(Debug, Error)]
pub enum GeneratorError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// Unparseable response body.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),

	/// The endpoint returned an error status.
	#[error("API error: {status} - {message}")]
	ApiError { status: u16, message: String },
}

#[async_trait]
pub trait ValuePropositionGenerator: Send + Sync {
	fn name(&self) -> &'static str;

	async fn generate(
		&self,
		technologies: &[String],
		locale: Locale,
	) -> Result<String, GeneratorError>;
}

/// Pick the generator matching the configuration.
pub fn from_config(config: &AiConfig) -> Result<Arc<dyn ValuePropositionGenerator>, GeneratorError> {
	match config.endpoint.as_deref() {
		Some(endpoint) => {
			info!(endpoint, model = %config.model, "using HTTP value proposition generator");
			let generator = HttpGenerator::new(
				endpoint,
				config.api_key.clone(),
				config.model.clone(),
				Duration::from_secs(config.timeout_secs),
			)?;
			Ok(Arc::new(generator))
		}
		None => {
			info!("no AI endpoint configured, using template value propositions");
			Ok(Arc::new(TemplateGenerator))
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
	model: &'a str,
	technologies: String,
	locale: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
	value_propositions: String,
}

/// Generator backed by a JSON model endpoint.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
	http_client: Client,
	endpoint: String,
	api_key: Option<String>,
	model: String,
}

impl HttpGenerator {
	pub fn new(
		endpoint: impl Into<String>,
		api_key: Option<String>,
		model: impl Into<String>,
		timeout: Duration,
	) -> Result<Self, GeneratorError> {
		let http_client = Client::builder()
			.user_agent(concat!("codecanvas-server/", env!("CARGO_PKG_VERSION")))
			.timeout(timeout)
			.build()?;

		Ok(Self {
			http_client,
			endpoint: endpoint.into(),
			api_key,
			model: model.into(),
		})
	}
}

#[async_trait]
impl ValuePropositionGenerator for HttpGenerator {
	fn name(&self) -> &'static str {
		"http"
	}

	#[instrument(skip(self), fields(endpoint = %self.endpoint))]
	async fn generate(
		&self,
		technologies: &[String],
		locale: Locale,
	) -> Result<String, GeneratorError> {
		let body = GenerateRequest {
			model: &self.model,
			technologies: technologies.join(", "),
			locale: locale.code(),
		};

		let mut request = self.http_client.post(&self.endpoint).json(&body);
		if let Some(api_key) = &self.api_key {
			request = request.bearer_auth(api_key);
		}

		let response = request.send().await.map_err(|e| {
			if e.is_timeout() {
				error!("Request timed out");
				return GeneratorError::Timeout;
			}
			error!(error = %e, "Network error during generation request");
			GeneratorError::Network(e)
		})?;

		let status = response.status();
		debug!(status = %status, "Received response from generator");

		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			error!(status = status.as_u16(), "Generator returned an error status");
			return Err(GeneratorError::ApiError {
				status: status.as_u16(),
				message,
			});
		}

		let body = response.text().await?;
		let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "Failed to parse generator response");
			GeneratorError::InvalidResponse(format!("JSON parse error: {e}"))
		})?;

		Ok(parsed.value_propositions)
	}
}

/// Offline generator with fixed copy per locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
	fn render(technologies: &[String], locale: Locale) -> String {
		let list = technologies.join(", ");
		let mut lines = Vec::with_capacity(technologies.len() + 4);

		match locale {
			Locale::En => {
				lines.push(format!("Why CodeCanvas is the right team for {list}:"));
				for tech in technologies {
					lines.push(format!(
						"- {tech}: hands-on delivery experience from first prototype to production."
					));
				}
				lines.push(
					"- One team covers design, engineering and deployment, so nothing is lost between hand-offs."
						.to_string(),
				);
				lines.push("- Weekly progress reports with working builds you can try.".to_string());
				lines.push(
					"- Bilingual English and Arabic interfaces with correct right-to-left layouts."
						.to_string(),
				);
			}
			Locale::Ar => {
				lines.push(format!("لماذا كود كانفاس هو الفريق الأنسب لمشروع يعتمد على {list}:"));
				for tech in technologies {
					lines.push(format!(
						"- {tech}: خبرة عملية في التسليم من النموذج الأولي حتى الإنتاج."
					));
				}
				lines.push("- فريق واحد يغطي التصميم والهندسة والنشر دون فجوات بين المراحل.".to_string());
				lines.push("- تقارير تقدم أسبوعية مع نسخ عاملة يمكنك تجربتها.".to_string());
				lines.push(
					"- واجهات ثنائية اللغة بالعربية والإنجليزية بتخطيط صحيح من اليمين إلى اليسار."
						.to_string(),
				);
			}
		}

		lines.join("\n")
	}
}

#[async_trait]
impl ValuePropositionGenerator for TemplateGenerator {
	fn name(&self) -> &'static str {
		"template"
	}

	async fn generate(
		&self,
		technologies: &[String],
		locale: Locale,
	) -> Result<String, GeneratorError> {
		Ok(Self::render(technologies, locale))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{http::StatusCode, routing::post, Json, Router};

	fn techs(items: &[&str]) -> Vec<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	async fn spawn_endpoint(router: Router) -> String {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, router).await.unwrap();
		});
		format!("http://{addr}/generate")
	}

	#[tokio::test]
	async fn test_template_mentions_every_technology() {
		let text = TemplateGenerator
			.generate(&techs(&["Rust", "React"]), Locale::En)
			.await
			.unwrap();
		assert!(text.starts_with("Why CodeCanvas"));
		assert!(text.contains("- Rust:"));
		assert!(text.contains("- React:"));
	}

	#[tokio::test]
	async fn test_template_is_localized() {
		let text = TemplateGenerator
			.generate(&techs(&["Flutter"]), Locale::Ar)
			.await
			.unwrap();
		assert!(text.contains("كود كانفاس"));
		assert!(text.contains("Flutter"));
	}

	#[test]
	fn test_from_config_without_endpoint_uses_template() {
		let generator = from_config(&AiConfig::default()).unwrap();
		assert_eq!(generator.name(), "template");
	}

	#[tokio::test]
	async fn test_http_generator_round_trip() {
		let router = Router::new().route(
			"/generate",
			post(|Json(body): Json<serde_json::Value>| async move {
				Json(serde_json::json!({
					"valuePropositions": format!("{} in {}", body["technologies"].as_str().unwrap_or(""), body["locale"].as_str().unwrap_or("")),
				}))
			}),
		);
		let endpoint = spawn_endpoint(router).await;

		let generator =
			HttpGenerator::new(endpoint, Some("k".into()), "m", Duration::from_secs(5)).unwrap();
		let text = generator
			.generate(&techs(&["Go", "Postgres"]), Locale::Ar)
			.await
			.unwrap();
		assert_eq!(text, "Go, Postgres in ar");
	}

	#[tokio::test]
	async fn test_http_generator_reports_error_status() {
		let router = Router::new().route(
			"/generate",
			post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
		);
		let endpoint = spawn_endpoint(router).await;

		let generator = HttpGenerator::new(endpoint, None, "m", Duration::from_secs(5)).unwrap();
		let err = generator
			.generate(&techs(&["Go"]), Locale::En)
			.await
			.unwrap_err();
		assert!(matches!(err, GeneratorError::ApiError { status: 503, .. }));
	}

	#[tokio::test]
	async fn test_http_generator_rejects_malformed_body() {
		let router = Router::new().route("/generate", post(|| async { "not json" }));
		let endpoint = spawn_endpoint(router).await;

		let generator = HttpGenerator::new(endpoint, None, "m", Duration::from_secs(5)).unwrap();
		let err = generator
			.generate(&techs(&["Go"]), Locale::En)
			.await
			.unwrap_err();
		assert!(matches!(err, GeneratorError::InvalidResponse(_)));
	}
}
