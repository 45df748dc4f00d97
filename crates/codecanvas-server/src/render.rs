// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Minimal server-rendered HTML shell.
//!
//! Every document carries `lang`/`dir` for its locale, a localized title,
//! navigation whose links stay under the current locale prefix, a language
//! switcher and the footer.

use chrono::{Datelike, Utc};
use codecanvas_common_i18n::{localized_href, switch_locale_path, Dictionary, Locale};
use codecanvas_server_auth::User;

/// Per-request rendering inputs.
pub struct PageContext<'a> {
	pub locale: Locale,
	pub dictionary: &'a Dictionary,
	/// Request path, used for the language switcher.
	pub path: &'a str,
	pub user: Option<&'a User>,
}

impl<'a> PageContext<'a> {
	pub fn t(&self, key: &'a str) -> &'a str {
		self.dictionary.text(key)
	}

	pub fn href(&self, page: &str) -> String {
		localized_href(self.locale, page)
	}
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}

const PUBLIC_NAV: &[(&str, &str)] = &[
	("", "navHome"),
	("services", "navServices"),
	("#projects", "navProjects"),
	("about", "navAbout"),
	("contact", "navContact"),
	("value-proposition", "navValueProp"),
];

fn link(href: &str, label: &str) -> String {
	format!(r#"<a href="{}">{}</a>"#, escape(href), escape(label))
}

fn header(ctx: &PageContext<'_>) -> String {
	let mut nav = String::new();
	for (page, key) in PUBLIC_NAV {
		nav.push_str(&link(&ctx.href(page), ctx.t(key)));
	}

	match ctx.user {
		Some(_) => {
			nav.push_str(&link(&ctx.href("dashboard"), ctx.t("navDashboard")));
			nav.push_str(&link(&ctx.href("profile"), ctx.t("navProfile")));
			nav.push_str(&format!(
				r#"<form method="post" action="/api/auth/logout"><button type="submit">{}</button></form>"#,
				escape(ctx.t("navLogout"))
			));
		}
		None => {
			nav.push_str(&link(&ctx.href("login"), ctx.t("navLogin")));
			nav.push_str(&link(&ctx.href("signup"), ctx.t("navSignup")));
		}
	}

	let mut switcher = String::new();
	for (target, key) in [(Locale::En, "english"), (Locale::Ar, "arabic")] {
		let href = switch_locale_path(ctx.path, target);
		if target == ctx.locale {
			switcher.push_str(&format!(
				r#"<a href="{}" hreflang="{}" aria-current="true">{}</a>"#,
				escape(&href),
				target.code(),
				escape(ctx.t(key))
			));
		} else {
			switcher.push_str(&format!(
				r#"<a href="{}" hreflang="{}">{}</a>"#,
				escape(&href),
				target.code(),
				escape(ctx.t(key))
			));
		}
	}

	format!(
		r#"<header><a class="brand" href="{home}">{site}</a><nav>{nav}</nav><div class="language" aria-label="{language}">{switcher}</div></header>"#,
		home = escape(&ctx.href("")),
		site = escape(ctx.t("siteName")),
		language = escape(ctx.t("language")),
	)
}

fn footer(ctx: &PageContext<'_>) -> String {
	let year = Utc::now().year().to_string();
	format!(
		"<footer><p>{}</p><p>{}</p></footer>",
		escape(&ctx.dictionary.format("footerCopyright", &[("year", &year)])),
		escape(ctx.t("footerBuiltWith")),
	)
}

/// Render a full document. `body` is trusted, already-escaped HTML.
pub fn document(ctx: &PageContext<'_>, title: &str, body: &str) -> String {
	let info = ctx.locale.info();
	format!(
		r#"<!DOCTYPE html><html lang="{lang}" dir="{dir}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title} - {site}</title><link rel="stylesheet" href="/_assets/site.css"></head><body>{header}<main>{body}</main>{footer}</body></html>"#,
		lang = info.code,
		dir = info.direction.as_html_dir(),
		title = escape(title),
		site = escape(ctx.t("siteName")),
		header = header(ctx),
		footer = footer(ctx),
	)
}

/// Body of a placeholder page.
pub fn coming_soon(ctx: &PageContext<'_>, title: &str) -> String {
	format!(
		r#"<h1>{}</h1><p class="coming-soon">{}</p>"#,
		escape(title),
		escape(ctx.t("comingSoon"))
	)
}

pub fn heading(title: &str, subtitle: Option<&str>) -> String {
	match subtitle {
		Some(subtitle) => format!("<h1>{}</h1><p>{}</p>", escape(title), escape(subtitle)),
		None => format!("<h1>{}</h1>", escape(title)),
	}
}

pub fn tag_list(items: &[&str]) -> String {
	let mut out = String::from("<ul>");
	for item in items {
		out.push_str(&format!("<li>{}</li>", escape(item)));
	}
	out.push_str("</ul>");
	out
}
