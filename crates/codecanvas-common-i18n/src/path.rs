// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale-prefixed path helpers.

use crate::locale::Locale;

/// Path prefixes that never receive a locale (framework assets, API, probes).
const BYPASS_PREFIXES: &[&str] = &["/_next", "/_assets", "/api", "/health"];

/// File extensions served as static files.
const STATIC_EXTENSIONS: &[&str] = &[
	"svg",
	"png",
	"jpg",
	"jpeg",
	"gif",
	"webp",
	"ico",
	"json",
	"xml",
	"txt",
	"webmanifest",
	"map",
	"woff2",
	"woff",
	"ttf",
	"eot",
];

/// Returns true when locale routing must not touch this path.
pub fn is_bypassed_path(path: &str) -> bool {
	if BYPASS_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
		return true;
	}

	path.rsplit_once('.')
		.is_some_and(|(_, ext)| STATIC_EXTENSIONS.contains(&ext))
}

/// Split a leading supported locale segment off `path`.
///
/// `/ar` and `/ar/...` match; `/arabic` and `/AR` do not.
///
/// ```
/// use codecanvas_common_i18n::{split_locale_prefix, Locale};
///
/// assert_eq!(split_locale_prefix("/ar"), Some((Locale::Ar, "")));
/// assert_eq!(split_locale_prefix("/en/services"), Some((Locale::En, "/services")));
/// assert_eq!(split_locale_prefix("/english"), None);
/// ```
pub fn split_locale_prefix(path: &str) -> Option<(Locale, &str)> {
	let rest = path.strip_prefix('/')?;
	let (segment, tail) = match rest.find('/') {
		Some(idx) => (&rest[..idx], &rest[idx..]),
		None => (rest, ""),
	};
	Locale::from_code(segment).map(|locale| (locale, tail))
}

/// Current locale from the first path segment, or `default`.
pub fn locale_from_path(path: &str, default: Locale) -> Locale {
	split_locale_prefix(path)
		.map(|(locale, _)| locale)
		.unwrap_or(default)
}

/// Prefix `path` with `locale`, inserting a separator when `path` lacks a
/// leading slash.
pub fn prefix_path(locale: Locale, path: &str) -> String {
	if path.starts_with('/') {
		format!("/{}{}", locale.code(), path)
	} else {
		format!("/{}/{}", locale.code(), path)
	}
}

/// Rewrite `path` for the language switcher: any two-letter lowercase prefix
/// is replaced by `target`.
pub fn switch_locale_path(path: &str, target: Locale) -> String {
	let stripped = strip_two_letter_prefix(path);
	format!("/{}{}", target.code(), stripped)
}

fn strip_two_letter_prefix(path: &str) -> &str {
	let bytes = path.as_bytes();
	let has_prefix = bytes.len() >= 3
		&& bytes[0] == b'/'
		&& bytes[1].is_ascii_lowercase()
		&& bytes[2].is_ascii_lowercase()
		&& (bytes.len() == 3 || bytes[3] == b'/');

	if !has_prefix {
		return if path.starts_with('/') { path } else { "/" };
	}
	if bytes.len() == 3 {
		"/"
	} else {
		&path[3..]
	}
}

/// Build an in-site link for `page` under `locale`.
///
/// An empty page (or `/`) links to the locale root.
pub fn localized_href(locale: Locale, page: &str) -> String {
	let page = page.trim_start_matches('/');
	if page.is_empty() {
		format!("/{}", locale.code())
	} else {
		format!("/{}/{}", locale.code(), page)
	}
}
