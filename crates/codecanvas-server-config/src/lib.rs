// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the CodeCanvas server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`CODECANVAS_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use codecanvas_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub i18n: I18nConfig,
	pub auth: AuthConfig,
	pub requests: RequestsConfig,
	pub ai: AiConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`CODECANVAS_SERVER_*`)
/// 2. Config file (`/etc/codecanvas/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let i18n = layer.i18n.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize();
	let requests = layer.requests.unwrap_or_default().finalize();
	let ai = layer.ai.unwrap_or_default().finalize();

	validate_config(&auth)?;

	info!(
		host = %http.host,
		port = http.port,
		default_locale = %i18n.default_locale,
		strict_dictionaries = i18n.strict_dictionaries,
		auth_test_mode = auth.test_mode,
		environment = %auth.environment,
		ai_endpoint_configured = ai.endpoint.is_some(),
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		logging,
		i18n,
		auth,
		requests,
		ai,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(auth: &AuthConfig) -> Result<(), ConfigError> {
	if auth.test_mode && auth.environment == "production" {
		return Err(ConfigError::Validation(
			"CODECANVAS_SERVER_AUTH_TEST_MODE=1 is set while CODECANVAS_SERVER_ENV=production. \
			 This is a security risk. Remove CODECANVAS_SERVER_AUTH_TEST_MODE or set \
			 CODECANVAS_SERVER_ENV to a non-production value."
				.to_string(),
		));
	}

	if auth.session_cookie_name.trim().is_empty() {
		return Err(ConfigError::InvalidValue {
			key: "auth.session_cookie_name".to_string(),
			message: "must not be empty".to_string(),
		});
	}

	if auth.session_idle_timeout_secs == 0 {
		return Err(ConfigError::InvalidValue {
			key: "auth.session_idle_timeout_secs".to_string(),
			message: "must be greater than zero".to_string(),
		});
	}

	if auth.max_sessions == 0 {
		return Err(ConfigError::InvalidValue {
			key: "auth.max_sessions".to_string(),
			message: "must be greater than zero".to_string(),
		});
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use codecanvas_common_i18n::Locale;

	#[test]
	fn test_test_mode_production_validation() {
		let auth = AuthConfig {
			test_mode: true,
			environment: "production".to_string(),
			..Default::default()
		};
		let result = validate_config(&auth);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("security risk"));
	}

	#[test]
	fn test_test_mode_development_ok() {
		let auth = AuthConfig {
			test_mode: true,
			environment: "development".to_string(),
			..Default::default()
		};
		assert!(validate_config(&auth).is_ok());
	}

	#[test]
	fn test_empty_cookie_name_rejected() {
		let auth = AuthConfig {
			session_cookie_name: "  ".to_string(),
			..Default::default()
		};
		assert!(matches!(
			validate_config(&auth),
			Err(ConfigError::InvalidValue { .. })
		));
	}

	#[test]
	fn test_zero_session_limits_rejected() {
		let auth = AuthConfig {
			max_sessions: 0,
			..Default::default()
		};
		assert!(matches!(
			validate_config(&auth),
			Err(ConfigError::InvalidValue { key, .. }) if key == "auth.max_sessions"
		));

		let auth = AuthConfig {
			session_idle_timeout_secs: 0,
			..Default::default()
		};
		assert!(validate_config(&auth).is_err());
	}

	#[test]
	fn test_socket_addr() {
		let config = ServerConfig {
			http: HttpConfig {
				host: "127.0.0.1".to_string(),
				port: 9000,
				base_url: "http://localhost:9000".to_string(),
				..Default::default()
			},
			..Default::default()
		};
		assert_eq!(config.socket_addr(), "127.0.0.1:9000");
	}

	#[test]
	fn test_finalize_empty_layer_uses_defaults() {
		let config = finalize(ServerConfigLayer::default()).unwrap();
		assert_eq!(config.http.port, 3000);
		assert_eq!(config.i18n.default_locale, Locale::En);
		assert!(config.i18n.strict_dictionaries);
		assert!(!config.auth.test_mode);
		assert_eq!(config.requests.recipient_email, "your-team@example.com");
	}

	#[test]
	fn test_later_layers_override_earlier() {
		let mut merged: ServerConfigLayer = toml::from_str(
			r#"
[i18n]
default_locale = "en"

[http]
port = 4000
"#,
		)
		.unwrap();
		merged.merge(
			toml::from_str(
				r#"
[i18n]
default_locale = "ar"
"#,
			)
			.unwrap(),
		);

		let config = finalize(merged).unwrap();
		assert_eq!(config.i18n.default_locale, Locale::Ar);
		assert_eq!(config.http.port, 4000);
	}
}
