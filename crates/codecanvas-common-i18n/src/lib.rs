// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Internationalization (i18n) support for CodeCanvas.
//!
//! This crate owns everything locale-related for the site:
//!
//! - the closed set of supported [`Locale`]s (English and Arabic) and their
//!   text [`Direction`],
//! - `Accept-Language` negotiation and locale-prefixed routing helpers,
//! - the per-locale translation [`Dictionary`] documents and the single
//!   [`DictionaryLoader`] used both while rendering and by on-demand fetches.
//!
//! # Key Naming Convention
//!
//! Dictionary keys are flat camelCase identifiers grouped by prefix:
//! `nav*`, `hero*`, `form*`, `dashboard*`, `toast*`, `validation*`.
//! Values may contain `{name}` placeholders, substituted with
//! [`Dictionary::format`].
//!
//! # Example
//!
//! ```
//! use codecanvas_common_i18n::{load_dictionary, resolve_request, Locale, Resolution};
//!
//! // Unprefixed paths redirect to the negotiated locale.
//! let resolution = resolve_request("/dashboard", None, Some("ar"), Locale::En);
//! assert_eq!(
//! 	resolution,
//! 	Resolution::Redirect {
//! 		locale: Locale::Ar,
//! 		location: "/ar/dashboard".to_string(),
//! 	}
//! );
//!
//! // Translations with placeholders.
//! let dictionary = load_dictionary("en");
//! let footer = dictionary.format("footerCopyright", &[("year", "2025")]);
//! assert!(footer.contains("2025"));
//! ```

mod dictionary;
mod error;
mod locale;
mod negotiate;
mod path;
mod resolve;

pub use dictionary::{
	check_key_parity, key_drift, load_dictionary, parse_dictionary, t, t_fmt, Dictionary,
	DictionaryLoader, KeyDrift,
};
pub use error::I18nError;
pub use locale::{available_locales, is_rtl, is_supported, Direction, Locale, LocaleInfo};
pub use negotiate::{negotiate, parse_accept_language, LanguageRange};
pub use path::{
	is_bypassed_path, locale_from_path, localized_href, prefix_path, split_locale_prefix,
	switch_locale_path,
};
pub use resolve::{resolve_locale, resolve_request, Resolution};

pub use locale::{DEFAULT_LOCALE, LOCALES};
