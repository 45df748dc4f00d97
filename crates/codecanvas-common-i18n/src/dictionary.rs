// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation dictionaries and the shared loader.
//!
//! One JSON document per locale is embedded at compile time and parsed once.
//! [`DictionaryLoader::get`] serves rendering code synchronously and
//! [`DictionaryLoader::fetch`] serves on-demand (client) requests; both read
//! the same parsed documents, so the two paths cannot drift apart.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::I18nError;
use crate::locale::{Locale, DEFAULT_LOCALE};

const EN_JSON: &str = include_str!("../locales/en.json");
const AR_JSON: &str = include_str!("../locales/ar.json");

static DICTIONARIES: Lazy<HashMap<Locale, Arc<Dictionary>>> = Lazy::new(|| {
	let mut map = HashMap::new();

	for locale in Locale::ALL {
		let dictionary = match parse_dictionary(locale, source_for(locale)) {
			Ok(dictionary) => dictionary,
			Err(e) => {
				tracing::error!(locale = %locale, error = %e, "Failed to parse translation dictionary");
				Dictionary::empty(locale)
			}
		};
		map.insert(locale, Arc::new(dictionary));
	}

	map
});

fn source_for(locale: Locale) -> &'static str {
	match locale {
		Locale::En => EN_JSON,
		Locale::Ar => AR_JSON,
	}
}

/// Immutable key → string mapping for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dictionary {
	#[serde(skip)]
	locale: Locale,
	#[serde(flatten)]
	entries: BTreeMap<String, String>,
}

impl Dictionary {
	pub fn new(locale: Locale, entries: BTreeMap<String, String>) -> Self {
		Self { locale, entries }
	}

	fn empty(locale: Locale) -> Self {
		Self::new(locale, BTreeMap::new())
	}

	pub fn locale(&self) -> Locale {
		self.locale
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Look up `key`, rendering the key itself when it is missing.
	pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
		match self.entries.get(key) {
			Some(value) => value.as_str(),
			None => {
				tracing::warn!(locale = %self.locale, key, "missing dictionary entry");
				key
			}
		}
	}

	/// Look up `key` and substitute `{name}` placeholders.
	pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
		interpolate(self.text(key), args)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn entries(&self) -> &BTreeMap<String, String> {
		&self.entries
	}
}

/// Substitute `{name}` placeholders in one pass; substituted values are never
/// rescanned. Unknown placeholders are left as written.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
	let mut result = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(open) = rest.find('{') {
		result.push_str(&rest[..open]);
		let after = &rest[open + 1..];
		let Some(close) = after.find('}') else {
			rest = &rest[open..];
			break;
		};

		let name = &after[..close];
		match args.iter().find(|(key, _)| *key == name) {
			Some((_, value)) => result.push_str(value),
			None => result.push_str(&rest[open..open + close + 2]),
		}
		rest = &after[close + 1..];
	}

	result.push_str(rest);
	result
}

/// Parse a flat JSON object of string values into a [`Dictionary`].
pub fn parse_dictionary(locale: Locale, json: &str) -> Result<Dictionary, I18nError> {
	let entries: BTreeMap<String, String> =
		serde_json::from_str(json).map_err(|source| I18nError::Parse { locale, source })?;
	Ok(Dictionary::new(locale, entries))
}

/// The single dictionary loader.
///
/// Cheap to copy; it only carries the configured default locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryLoader {
	default: Locale,
}

impl DictionaryLoader {
	pub fn new(default: Locale) -> Self {
		Self { default }
	}

	pub fn default_locale(&self) -> Locale {
		self.default
	}

	/// Synchronous path used while rendering a page.
	pub fn get(&self, locale: Locale) -> Arc<Dictionary> {
		match DICTIONARIES.get(&locale) {
			Some(dictionary) => Arc::clone(dictionary),
			None => Arc::new(Dictionary::empty(locale)),
		}
	}

	/// Resolve a raw code; unrecognized codes get the default locale's mapping.
	pub fn get_by_code(&self, code: &str) -> Arc<Dictionary> {
		let locale = Locale::from_code(code).unwrap_or_else(|| {
			tracing::debug!(code, default = %self.default, "unknown locale code, serving default dictionary");
			self.default
		});
		self.get(locale)
	}

	/// On-demand path used by interactive clients.
	pub async fn fetch(&self, code: &str) -> Arc<Dictionary> {
		self.get_by_code(code)
	}
}

/// Load the dictionary for `code`, falling back to the default locale.
///
/// # Example
///
/// ```
/// use codecanvas_common_i18n::{load_dictionary, Locale};
///
/// assert_eq!(load_dictionary("ar").locale(), Locale::Ar);
/// assert_eq!(load_dictionary("fr").locale(), Locale::En);
/// ```
pub fn load_dictionary(code: &str) -> Arc<Dictionary> {
	DictionaryLoader::new(DEFAULT_LOCALE).get_by_code(code)
}

/// Translate `key` for the locale `code`.
pub fn t(code: &str, key: &str) -> String {
	load_dictionary(code).text(key).to_string()
}

/// Translate `key` for the locale `code` with variable substitution.
pub fn t_fmt(code: &str, key: &str, args: &[(&str, &str)]) -> String {
	load_dictionary(code).format(key, args)
}

/// Keys one locale lacks relative to the union of all dictionaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDrift {
	pub locale: Locale,
	pub missing: Vec<String>,
}

/// Compare key sets and report, per dictionary, the keys it is missing.
pub fn key_drift(dictionaries: &[&Dictionary]) -> Vec<KeyDrift> {
	let all_keys: BTreeSet<&str> = dictionaries.iter().copied().flat_map(Dictionary::keys).collect();

	dictionaries
		.iter()
		.filter_map(|dictionary| {
			let missing: Vec<String> = all_keys
				.iter()
				.filter(|key| dictionary.get(key).is_none())
				.map(|key| key.to_string())
				.collect();
			(!missing.is_empty()).then_some(KeyDrift {
				locale: dictionary.locale(),
				missing,
			})
		})
		.collect()
}

/// Verify that every embedded dictionary defines the same key set.
pub fn check_key_parity() -> Result<(), I18nError> {
	let loader = DictionaryLoader::default();
	let loaded: Vec<Arc<Dictionary>> = Locale::ALL.into_iter().map(|l| loader.get(l)).collect();
	let refs: Vec<&Dictionary> = loaded.iter().map(Arc::as_ref).collect();

	let drift = key_drift(&refs);
	if drift.is_empty() {
		Ok(())
	} else {
		Err(I18nError::KeyDrift(drift))
	}
}
