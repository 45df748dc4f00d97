// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `Accept-Language` negotiation against the supported locale set.

use crate::locale::Locale;

/// One entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange<'a> {
	pub tag: &'a str,
	pub quality: f32,
}

/// Parse an `Accept-Language` header into ranges ordered by preference.
///
/// Entries with a malformed tag or quality are skipped, as are entries with
/// `q=0` (explicitly not acceptable). Ranges with equal quality keep their
/// header order.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange<'_>> {
	let mut ranges: Vec<LanguageRange<'_>> = header
		.split(',')
		.filter_map(parse_range)
		.filter(|range| range.quality > 0.0)
		.collect();

	// sort_by is stable, so header order breaks ties.
	ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));
	ranges
}

fn parse_range(part: &str) -> Option<LanguageRange<'_>> {
	let mut components = part.split(';');
	let tag = components.next()?.trim();
	if !is_valid_tag(tag) {
		return None;
	}

	let mut quality = 1.0_f32;
	for param in components {
		let (name, value) = param.split_once('=')?;
		if name.trim().eq_ignore_ascii_case("q") {
			quality = value.trim().parse::<f32>().ok()?;
			if !(0.0..=1.0).contains(&quality) {
				return None;
			}
		}
	}

	Some(LanguageRange { tag, quality })
}

fn is_valid_tag(tag: &str) -> bool {
	if tag == "*" {
		return true;
	}
	!tag.is_empty()
		&& tag
			.split('-')
			.all(|sub| !sub.is_empty() && sub.len() <= 8 && sub.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn match_range(tag: &str, default: Locale) -> Option<Locale> {
	if tag == "*" {
		return Some(default);
	}
	if let Some(locale) = Locale::from_code_ignore_case(tag) {
		return Some(locale);
	}
	let primary = tag.split('-').next()?;
	Locale::from_code_ignore_case(primary)
}

/// Pick the best supported locale for a request's `Accept-Language` header.
///
/// Always returns a member of the supported set: a missing, empty or
/// unparseable header, or one naming only unsupported languages, yields
/// `default`.
///
/// # Example
///
/// ```
/// use codecanvas_common_i18n::{negotiate, Locale};
///
/// assert_eq!(negotiate(Some("ar-EG,ar;q=0.9,en;q=0.8"), Locale::En), Locale::Ar);
/// assert_eq!(negotiate(Some("fr-FR"), Locale::En), Locale::En);
/// assert_eq!(negotiate(None, Locale::Ar), Locale::Ar);
/// ```
pub fn negotiate(header: Option<&str>, default: Locale) -> Locale {
	let Some(header) = header else {
		return default;
	};

	let ranges = parse_accept_language(header);
	if ranges.is_empty() && !header.trim().is_empty() {
		tracing::debug!(header, "unparseable Accept-Language header, using default locale");
	}

	ranges
		.iter()
		.find_map(|range| match_range(range.tag, default))
		.unwrap_or(default)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_parse_orders_by_quality() {
		let ranges = parse_accept_language("en;q=0.5, ar, fr;q=0.8");
		let tags: Vec<_> = ranges.iter().map(|r| r.tag).collect();
		assert_eq!(tags, vec!["ar", "fr", "en"]);
	}

	#[test]
	fn test_parse_keeps_header_order_on_ties() {
		let ranges = parse_accept_language("en, ar");
		assert_eq!(ranges[0].tag, "en");
		assert_eq!(ranges[1].tag, "ar");
	}

	#[test]
	fn test_parse_drops_zero_quality_and_garbage() {
		let ranges = parse_accept_language("ar;q=0, en;q=abc, ;;, fr");
		let tags: Vec<_> = ranges.iter().map(|r| r.tag).collect();
		assert_eq!(tags, vec!["fr"]);
	}

	#[test]
	fn test_negotiate_exact_match() {
		assert_eq!(negotiate(Some("ar"), Locale::En), Locale::Ar);
		assert_eq!(negotiate(Some("EN"), Locale::Ar), Locale::En);
	}

	#[test]
	fn test_negotiate_primary_subtag() {
		assert_eq!(negotiate(Some("ar-SA"), Locale::En), Locale::Ar);
		assert_eq!(negotiate(Some("en-GB,en;q=0.9"), Locale::Ar), Locale::En);
	}

	#[test]
	fn test_negotiate_skips_unsupported() {
		assert_eq!(negotiate(Some("fr-FR,de;q=0.9,ar;q=0.1"), Locale::En), Locale::Ar);
	}

	#[test]
	fn test_negotiate_zero_quality_is_not_acceptable() {
		assert_eq!(negotiate(Some("ar;q=0"), Locale::En), Locale::En);
	}

	#[test]
	fn test_negotiate_wildcard_uses_default() {
		assert_eq!(negotiate(Some("fr, *;q=0.5"), Locale::Ar), Locale::Ar);
	}

	#[test]
	fn test_negotiate_unparseable_falls_back() {
		assert_eq!(negotiate(Some("%%%"), Locale::En), Locale::En);
		assert_eq!(negotiate(Some(""), Locale::Ar), Locale::Ar);
		assert_eq!(negotiate(None, Locale::En), Locale::En);
	}

	proptest! {
		#[test]
		fn negotiate_always_returns_supported(header in ".{0,64}") {
			let locale = negotiate(Some(&header), Locale::En);
			prop_assert!(Locale::ALL.contains(&locale));
		}

		#[test]
		fn negotiate_never_panics_on_weights(q in "[0-9.]{0,5}") {
			let header = format!("ar;q={q}, en;q=0.3");
			let locale = negotiate(Some(&header), Locale::En);
			prop_assert!(Locale::ALL.contains(&locale));
		}
	}
}
