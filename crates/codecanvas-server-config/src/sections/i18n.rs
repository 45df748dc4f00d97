// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Localization configuration section.

use codecanvas_common_i18n::{resolve_locale, Locale, DEFAULT_LOCALE};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nConfig {
	/// Locale used when negotiation finds no acceptable match.
	pub default_locale: Locale,
	/// Refuse to start when locale dictionaries have different key sets.
	pub strict_dictionaries: bool,
}

impl Default for I18nConfig {
	fn default() -> Self {
		Self {
			default_locale: DEFAULT_LOCALE,
			strict_dictionaries: true,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct I18nConfigLayer {
	#[serde(default)]
	pub default_locale: Option<String>,
	#[serde(default)]
	pub strict_dictionaries: Option<bool>,
}

impl I18nConfigLayer {
	pub fn merge(&mut self, other: I18nConfigLayer) {
		if other.default_locale.is_some() {
			self.default_locale = other.default_locale;
		}
		if other.strict_dictionaries.is_some() {
			self.strict_dictionaries = other.strict_dictionaries;
		}
	}

	/// Unsupported codes fall back to the built-in default locale.
	pub fn finalize(self) -> I18nConfig {
		if let Some(code) = self.default_locale.as_deref() {
			if Locale::from_code(code).is_none() {
				tracing::warn!(code, fallback = %DEFAULT_LOCALE, "unsupported default locale in configuration");
			}
		}

		I18nConfig {
			default_locale: resolve_locale(self.default_locale.as_deref(), DEFAULT_LOCALE.code()),
			strict_dictionaries: self.strict_dictionaries.unwrap_or(true),
		}
	}
}
