// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for locale routing and dictionary delivery.

mod common;

use axum::http::{header::CONTENT_LANGUAGE, StatusCode};
use codecanvas_common_i18n::Locale;
use codecanvas_server::ServerConfig;
use common::{body_json, body_text, location, setup, setup_with};

#[tokio::test]
async fn test_unprefixed_path_redirects_to_negotiated_locale() {
	let app = setup();
	let response = app.get_with("/dashboard", Some("ar"), None).await;
	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(location(&response).as_deref(), Some("/ar/dashboard"));
}

#[tokio::test]
async fn test_root_redirect_keeps_query() {
	let app = setup();
	let response = app.get("/?ref=newsletter").await;
	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(location(&response).as_deref(), Some("/en/?ref=newsletter"));
}

#[tokio::test]
async fn test_configured_default_locale_used_without_header() {
	let mut config = ServerConfig::default();
	config.i18n.default_locale = Locale::Ar;
	let app = setup_with(config);

	let response = app.get("/services").await;
	assert_eq!(location(&response).as_deref(), Some("/ar/services"));

	let response = app.get_with("/services", Some("fr-FR, de;q=0.5"), None).await;
	assert_eq!(location(&response).as_deref(), Some("/ar/services"));
}

#[tokio::test]
async fn test_header_quality_ordering() {
	let app = setup();
	let response = app
		.get_with("/about", Some("en;q=0.4, ar-EG;q=0.9"), None)
		.await;
	assert_eq!(location(&response).as_deref(), Some("/ar/about"));
}

#[tokio::test]
async fn test_prefixed_paths_are_served() {
	let app = setup();

	let response = app.get_with("/ar", Some("en"), None).await;
	assert_eq!(response.status(), StatusCode::OK);
	let html = body_text(response).await;
	assert!(html.contains(r#"<html lang="ar" dir="rtl">"#));
	assert!(html.contains(r#"href="/ar/services""#));

	let response = app.get("/en/").await;
	assert_eq!(response.status(), StatusCode::OK);
	let html = body_text(response).await;
	assert!(html.contains(r#"<html lang="en" dir="ltr">"#));
	assert!(html.contains("E-commerce Platform"));
}

#[tokio::test]
async fn test_bypassed_paths_are_not_redirected() {
	let app = setup();

	let response = app.get_with("/logo.svg", Some("ar"), None).await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert!(location(&response).is_none());

	let response = app.get("/api/unknown").await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert!(location(&response).is_none());

	let response = app.get("/health").await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_localized_page_is_localized_404() {
	let app = setup();
	let response = app.get("/ar/does-not-exist").await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	let html = body_text(response).await;
	assert!(html.contains("الصفحة غير موجودة"));
}

#[tokio::test]
async fn test_language_switcher_links() {
	let app = setup();
	let html = body_text(app.get("/en/about").await).await;
	assert!(html.contains(r#"href="/ar/about" hreflang="ar""#));
	assert!(html.contains("<title>About Us - CodeCanvas</title>"));
}

#[tokio::test]
async fn test_dictionary_endpoint() {
	let app = setup();

	let response = app.get("/api/dictionaries/ar").await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers().get(CONTENT_LANGUAGE).unwrap(), "ar");
	let dictionary = body_json(response).await;
	assert_eq!(dictionary["siteName"], "كود كانفاس");

	let response = app.get("/api/dictionaries/fr").await;
	assert_eq!(response.headers().get(CONTENT_LANGUAGE).unwrap(), "en");
	let fallback = body_json(response).await;
	let english = body_json(app.get("/api/dictionaries/en").await).await;
	assert_eq!(fallback, english);
}

#[tokio::test]
async fn test_service_pages() {
	let app = setup();

	let response = app.get("/en/services/web-development").await;
	assert_eq!(response.status(), StatusCode::OK);
	let html = body_text(response).await;
	assert!(html.contains("Custom Web Development"));
	assert!(html.contains(r#"<a href="/en/login">log in</a>"#));

	let response = app.get("/ar/services/missing").await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	let html = body_text(response).await;
	assert!(html.contains("الخدمة غير موجودة"));
}

#[tokio::test]
async fn test_health() {
	let app = setup();
	let health = body_json(app.get("/health").await).await;
	assert_eq!(health["components"]["dictionaries"]["status"], "healthy");
	assert_eq!(
		health["components"]["value_propositions"]["message"],
		"counting"
	);
}

#[tokio::test]
async fn test_static_assets_served_without_locale() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("logo.svg"), "<svg></svg>").unwrap();

	let mut config = ServerConfig::default();
	config.http.assets_dir = dir.path().to_string_lossy().into_owned();
	let app = setup_with(config);

	let response = app.get_with("/_assets/logo.svg", Some("ar"), None).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(location(&response).is_none());
	assert_eq!(body_text(response).await, "<svg></svg>");

	let response = app.get("/_assets/missing.svg").await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let health = body_json(app.get("/health").await).await;
	assert_eq!(health["components"]["assets"]["status"], "healthy");
}
