// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution logic.

use crate::locale::{Locale, DEFAULT_LOCALE};
use crate::negotiate::negotiate;
use crate::path::{is_bypassed_path, prefix_path, split_locale_prefix};

/// Resolve a configured locale code against the supported set.
///
/// Resolution order (highest to lowest priority):
/// 1. The preferred code (if supported)
/// 2. The fallback code (if supported)
/// 3. [`DEFAULT_LOCALE`]
///
/// # Example
///
/// ```
/// use codecanvas_common_i18n::{resolve_locale, Locale};
///
/// assert_eq!(resolve_locale(Some("ar"), "en"), Locale::Ar);
/// assert_eq!(resolve_locale(None, "ar"), Locale::Ar);
/// assert_eq!(resolve_locale(Some("invalid"), "also_invalid"), Locale::En);
/// ```
pub fn resolve_locale(preferred: Option<&str>, fallback: &str) -> Locale {
	preferred
		.and_then(Locale::from_code)
		.or_else(|| Locale::from_code(fallback))
		.unwrap_or(DEFAULT_LOCALE)
}

/// Outcome of running a request path through locale routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// Assets, API routes and static files: routing does not apply.
	Bypass,
	/// The path already carries a supported locale prefix.
	Resolved(Locale),
	/// The path has no locale; redirect to `location`.
	Redirect { locale: Locale, location: String },
}

/// Decide how a request is routed with respect to its locale.
///
/// A path is resolved when it equals `/<locale>` or starts with
/// `/<locale>/`. Anything else (outside the bypass set) is redirected to the
/// same path and query under the negotiated locale, so resolving a redirect
/// target again always yields [`Resolution::Resolved`].
pub fn resolve_request(
	path: &str,
	query: Option<&str>,
	accept_language: Option<&str>,
	default: Locale,
) -> Resolution {
	if is_bypassed_path(path) {
		return Resolution::Bypass;
	}

	if let Some((locale, _)) = split_locale_prefix(path) {
		return Resolution::Resolved(locale);
	}

	let locale = negotiate(accept_language, default);
	let mut location = prefix_path(locale, path);
	if let Some(query) = query.filter(|q| !q.is_empty()) {
		location.push('?');
		location.push_str(query);
	}

	Resolution::Redirect { locale, location }
}
