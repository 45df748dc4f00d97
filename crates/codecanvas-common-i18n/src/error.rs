// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::dictionary::KeyDrift;
use crate::locale::Locale;

#[derive(Debug, thiserror::Error)]
pub enum I18nError {
	#[error("Unsupported locale: {0}")]
	UnsupportedLocale(String),

	#[error("Failed to parse {locale} dictionary: {source}")]
	Parse {
		locale: Locale,
		#[source]
		source: serde_json::Error,
	},

	#[error("Dictionary key sets differ: {}", describe_drift(.0))]
	KeyDrift(Vec<KeyDrift>),
}

fn describe_drift(drift: &[KeyDrift]) -> String {
	drift
		.iter()
		.map(|d| format!("{} is missing [{}]", d.locale, d.missing.join(", ")))
		.collect::<Vec<_>>()
		.join("; ")
}
