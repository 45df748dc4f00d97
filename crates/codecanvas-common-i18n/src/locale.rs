// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale metadata and direction support.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Left-to-right (e.g., English)
	Ltr,
	/// Right-to-left (e.g., Arabic)
	Rtl,
}

impl Direction {
	/// Returns the HTML `dir` attribute value.
	pub fn as_html_dir(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}

	/// Returns the CSS `text-align` value for the start of text.
	pub fn text_align_start(&self) -> &'static str {
		match self {
			Direction::Ltr => "left",
			Direction::Rtl => "right",
		}
	}
}

/// A supported site locale.
///
/// The set is closed: anything that is not one of these variants is resolved
/// to [`DEFAULT_LOCALE`] before it reaches rendering code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
	En,
	Ar,
}

impl Locale {
	/// Every supported locale, default first.
	pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

	/// ISO 639-1 code used as the URL prefix.
	pub const fn code(self) -> &'static str {
		match self {
			Locale::En => "en",
			Locale::Ar => "ar",
		}
	}

	/// Parse an exact, lowercase locale code as it appears in a URL segment.
	pub fn from_code(code: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|locale| locale.code() == code)
	}

	/// Parse a code ignoring ASCII case, as found in request headers.
	pub fn from_code_ignore_case(code: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|locale| locale.code().eq_ignore_ascii_case(code))
	}

	pub fn info(self) -> &'static LocaleInfo {
		match self {
			Locale::En => &LOCALES[0],
			Locale::Ar => &LOCALES[1],
		}
	}

	pub fn direction(self) -> Direction {
		self.info().direction
	}
}

impl Default for Locale {
	fn default() -> Self {
		DEFAULT_LOCALE
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl FromStr for Locale {
	type Err = I18nError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_code_ignore_case(s.trim()).ok_or_else(|| I18nError::UnsupportedLocale(s.to_string()))
	}
}

/// Metadata about a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
	pub locale: Locale,
	/// ISO 639-1 language code (e.g., "en", "ar")
	pub code: &'static str,
	/// English name of the language
	pub name: &'static str,
	/// Native name of the language
	pub native_name: &'static str,
	/// Text direction
	pub direction: Direction,
}

/// Default locale used as fallback.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// All supported locales.
pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		locale: Locale::En,
		code: "en",
		name: "English",
		native_name: "English",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		locale: Locale::Ar,
		code: "ar",
		name: "Arabic",
		native_name: "العربية",
		direction: Direction::Rtl,
	},
];

/// Check if a locale code uses right-to-left text direction.
///
/// Returns `false` for unsupported locales.
pub fn is_rtl(code: &str) -> bool {
	Locale::from_code(code).is_some_and(|locale| locale.direction() == Direction::Rtl)
}

/// Check if a locale code is supported.
pub fn is_supported(code: &str) -> bool {
	Locale::from_code(code).is_some()
}

/// Get all supported locales.
pub fn available_locales() -> &'static [LocaleInfo] {
	LOCALES
}
