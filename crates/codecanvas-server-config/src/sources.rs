// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	AiConfigLayer, AuthConfigLayer, HttpConfigLayer, I18nConfigLayer, LoggingConfigLayer,
	RequestsConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/codecanvas/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: CODECANVAS_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			logging: Some(load_logging_from_env()),
			i18n: Some(load_i18n_from_env()),
			auth: Some(load_auth_from_env()?),
			requests: Some(load_requests_from_env()),
			ai: Some(load_ai_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u16 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("CODECANVAS_SERVER_HOST"),
		port: env_u16("CODECANVAS_SERVER_PORT")?,
		base_url: env_var("CODECANVAS_SERVER_BASE_URL"),
		assets_dir: env_var("CODECANVAS_SERVER_ASSETS_DIR"),
	})
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("CODECANVAS_SERVER_LOG_LEVEL"),
		json: env_bool("CODECANVAS_SERVER_LOG_JSON"),
	}
}

fn load_i18n_from_env() -> I18nConfigLayer {
	I18nConfigLayer {
		default_locale: env_var("CODECANVAS_SERVER_DEFAULT_LOCALE"),
		strict_dictionaries: env_bool("CODECANVAS_SERVER_STRICT_DICTIONARIES"),
	}
}

fn load_auth_from_env() -> Result<AuthConfigLayer, ConfigError> {
	Ok(AuthConfigLayer {
		test_mode: env_bool("CODECANVAS_SERVER_AUTH_TEST_MODE"),
		environment: env_var("CODECANVAS_SERVER_ENV"),
		session_cookie_name: env_var("CODECANVAS_SERVER_SESSION_COOKIE_NAME"),
		signups_disabled: env_bool("CODECANVAS_SERVER_SIGNUPS_DISABLED"),
		session_idle_timeout_secs: env_u64("CODECANVAS_SERVER_SESSION_IDLE_TIMEOUT_SECS")?,
		max_sessions: env_u64("CODECANVAS_SERVER_MAX_SESSIONS")?.map(|n| n as usize),
	})
}

fn load_requests_from_env() -> RequestsConfigLayer {
	RequestsConfigLayer {
		recipient_email: env_var("CODECANVAS_SERVER_SERVICE_REQUEST_RECIPIENT"),
	}
}

fn load_ai_from_env() -> Result<AiConfigLayer, ConfigError> {
	Ok(AiConfigLayer {
		endpoint: env_var("CODECANVAS_SERVER_AI_ENDPOINT"),
		api_key: env_var("CODECANVAS_SERVER_AI_API_KEY"),
		model: env_var("CODECANVAS_SERVER_AI_MODEL"),
		timeout_secs: env_u64("CODECANVAS_SERVER_AI_TIMEOUT_SECS")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.i18n.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let source = TomlSource::new("/nonexistent/config.toml");
		let layer = source.load().unwrap();
		assert!(layer.http.is_none());
	}

	#[test]
	fn test_toml_source_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[requests]\nrecipient_email = \"sales@codecanvas.example\"").unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		assert_eq!(
			layer.requests.unwrap().recipient_email,
			Some("sales@codecanvas.example".to_string())
		);
	}

	#[test]
	fn test_toml_source_reports_parse_errors() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[http\nport = ").unwrap();

		let result = TomlSource::new(file.path()).load();
		assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn test_env_u16_rejects_garbage() {
		std::env::set_var("CODECANVAS_TEST_ENV_U16_GARBAGE", "not-a-port");
		let result = env_u16("CODECANVAS_TEST_ENV_U16_GARBAGE");
		std::env::remove_var("CODECANVAS_TEST_ENV_U16_GARBAGE");
		assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
	}

	#[test]
	fn test_env_bool_accepts_one_and_true() {
		std::env::set_var("CODECANVAS_TEST_ENV_BOOL_ONE", "1");
		std::env::set_var("CODECANVAS_TEST_ENV_BOOL_TRUE", "TRUE");
		assert_eq!(env_bool("CODECANVAS_TEST_ENV_BOOL_ONE"), Some(true));
		assert_eq!(env_bool("CODECANVAS_TEST_ENV_BOOL_TRUE"), Some(true));
		assert_eq!(env_bool("CODECANVAS_TEST_ENV_BOOL_UNSET"), None);
		std::env::remove_var("CODECANVAS_TEST_ENV_BOOL_ONE");
		std::env::remove_var("CODECANVAS_TEST_ENV_BOOL_TRUE");
	}
}
