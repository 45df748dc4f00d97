// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for sign-in flows, sessions and the dashboard route
//! guard.

mod common;

use axum::http::{header::SET_COOKIE, StatusCode};
use codecanvas_server::ServerConfig;
use common::{body_json, body_text, location, session_cookie, setup, setup_with};
use serde_json::json;

#[tokio::test]
async fn test_guarded_pages_redirect_to_localized_login() {
	let app = setup();

	for path in [
		"/en/dashboard",
		"/en/dashboard/projects",
		"/en/dashboard/cms/about",
		"/en/chat",
		"/en/notifications",
		"/en/profile",
	] {
		let response = app.get(path).await;
		assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
		assert_eq!(location(&response).as_deref(), Some("/en/login"), "{path}");
	}

	let response = app.get("/ar/dashboard").await;
	assert_eq!(location(&response).as_deref(), Some("/ar/login"));
}

#[tokio::test]
async fn test_signup_login_logout_flow() {
	let app = setup();

	let response = app
		.post_json(
			"/api/auth/signup",
			json!({"email": "Lina@Example.com", "password": "secret1", "confirmPassword": "secret1"}),
			Some("ar"),
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
	assert!(set_cookie.starts_with("codecanvas_session="));
	assert!(set_cookie.contains("HttpOnly"));
	assert!(!set_cookie.contains("Secure"));
	let cookie = session_cookie(&response).unwrap();

	let body = body_json(response).await;
	assert_eq!(body["redirect"], "/ar/dashboard");
	assert_eq!(body["notice"]["title"], "تم إنشاء الحساب");
	assert_eq!(body["user"]["email"], "lina@example.com");

	let response = app.get_with("/ar/dashboard", None, Some(&cookie)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let html = body_text(response).await;
	assert!(html.contains("مرحبًا بعودتك، lina@example.com!"));

	let response = app
		.post_json("/api/auth/logout", json!({}), None, Some(&cookie))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let cleared = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
	assert!(cleared.starts_with("codecanvas_session=;"));
	assert!(cleared.contains("Max-Age=0"));
	let body = body_json(response).await;
	assert_eq!(body["redirect"], "/en/login");
	assert_eq!(body["notice"]["title"], "Logged Out");
	assert!(app.state.sessions.is_empty().await);

	let response = app.get_with("/en/dashboard", None, Some(&cookie)).await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);

	let response = app
		.post_json(
			"/api/auth/login",
			json!({"email": "lina@example.com", "password": "secret1"}),
			None,
			Some(&cookie),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let fresh = session_cookie(&response).unwrap();
	assert_ne!(fresh, cookie);
	let body = body_json(response).await;
	assert_eq!(body["redirect"], "/en/dashboard");

	let response = app.get_with("/en/profile", None, Some(&fresh)).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(app.state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_login_failure_notice_is_localized() {
	let app = setup();
	app.sign_up("omar@example.com").await;

	let response = app
		.post_json(
			"/api/auth/login",
			json!({"email": "omar@example.com", "password": "wrong-password"}),
			None,
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	let body = body_json(response).await;
	assert_eq!(body["error"], "invalid_credentials");
	assert_eq!(body["notice"]["title"], "Login Failed");
	assert_eq!(body["notice"]["description"], "Invalid email or password.");

	let response = app
		.post_json(
			"/api/auth/login",
			json!({"email": "nobody@example.com", "password": "secret1"}),
			Some("ar"),
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	let body = body_json(response).await;
	assert_eq!(
		body["notice"]["description"],
		"البريد الإلكتروني أو كلمة المرور غير صحيحة."
	);
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
	let app = setup();
	app.sign_up("dana@example.com").await;

	let response = app
		.post_json(
			"/api/auth/signup",
			json!({"email": "dana@example.com", "password": "secret1", "confirmPassword": "secret1"}),
			None,
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::CONFLICT);
	let body = body_json(response).await;
	assert_eq!(body["notice"]["description"], "This email address is already in use.");
}

#[tokio::test]
async fn test_signup_validation_happens_first() {
	let app = setup();
	let response = app
		.post_json(
			"/api/auth/signup",
			json!({"email": "a@b.co", "password": "secret1", "confirmPassword": "secret2"}),
			None,
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert!(response.headers().get(SET_COOKIE).is_none());

	let body = body_json(response).await;
	assert_eq!(body["errors"]["confirmPassword"][0], "Passwords don't match");
	assert!(app.state.sessions.is_empty().await);
	assert!(app.state.sessions.directory().is_empty().await);
}

#[tokio::test]
async fn test_signups_disabled() {
	let mut config = ServerConfig::default();
	config.auth.signups_disabled = true;
	let app = setup_with(config);

	let response = app
		.post_json(
			"/api/auth/signup",
			json!({"email": "a@b.co", "password": "secret1", "confirmPassword": "secret1"}),
			None,
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_oauth_sign_in() {
	let app = setup();
	let assertion = json!({
		"subject": "g-123",
		"email": "huda@example.com",
		"displayName": "Huda",
	});

	let response = app
		.post_json("/api/auth/oauth/google", assertion.clone(), None, None)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let cookie = session_cookie(&response).unwrap();
	let body = body_json(response).await;
	assert_eq!(body["notice"]["title"], "Signed in with Google successfully!");
	assert_eq!(body["user"]["providerId"], "google.com");

	let html = body_text(app.get_with("/en/dashboard", None, Some(&cookie)).await).await;
	assert!(html.contains("Welcome back, Huda!"));

	let response = app
		.post_json("/api/auth/oauth/github", assertion, None, None)
		.await;
	assert_eq!(response.status(), StatusCode::CONFLICT);
	let body = body_json(response).await;
	assert_eq!(body["error"], "account_exists_with_different_credential");
	assert_eq!(body["notice"]["title"], "Sign-in Failed");

	let response = app
		.post_json("/api/auth/oauth/twitter", json!({}), None, None)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_sections() {
	let app = setup();
	let cookie = app.sign_up("sami@example.com").await;

	let response = app
		.get_with("/en/dashboard/cms/contact", None, Some(&cookie))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let html = body_text(response).await;
	assert!(html.contains("Edit Contact Page"));
	assert!(html.contains("Coming soon"));

	let response = app.get_with("/en/dashboard/billing", None, Some(&cookie)).await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let html = body_text(app.get_with("/en/dashboard", None, Some(&cookie)).await).await;
	assert!(html.contains("Registered users"));
}

#[tokio::test]
async fn test_test_mode_admin_until_sign_out() {
	let mut config = ServerConfig::default();
	config.auth.test_mode = true;
	let app = setup_with(config);

	let response = app.get("/en/dashboard").await;
	assert_eq!(response.status(), StatusCode::OK);
	let html = body_text(response).await;
	assert!(html.contains("Welcome back, Admin (Test Mode)!"));

	let session = body_json(app.get("/api/auth/session").await).await;
	assert_eq!(session["user"]["email"], "admin@gmail.com");
	assert_eq!(session["loading"], false);

	let response = app.post_json("/api/auth/logout", json!({}), None, None).await;
	assert_eq!(response.status(), StatusCode::OK);
	let cookie = session_cookie(&response).unwrap();

	let response = app.get_with("/en/dashboard", None, Some(&cookie)).await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(app.state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_anonymous_auth_requests_do_not_register_sessions() {
	let app = setup();
	app.sign_up("hala@example.com").await;
	assert_eq!(app.state.sessions.len().await, 1);

	for _ in 0..25 {
		let response = app.post_json("/api/auth/logout", json!({}), None, None).await;
		assert_eq!(response.status(), StatusCode::OK);
		let cleared = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
		assert!(cleared.contains("Max-Age=0"));

		let response = app
			.post_json(
				"/api/auth/login",
				json!({"email": "hala@example.com", "password": "wrong-password"}),
				None,
				None,
			)
			.await;
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
		assert!(response.headers().get(SET_COOKIE).is_none());

		let response = app
			.post_json(
				"/api/auth/logout",
				json!({}),
				None,
				Some("codecanvas_session=unknown"),
			)
			.await;
		assert_eq!(response.status(), StatusCode::OK);
	}

	assert_eq!(app.state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_session_capacity_evicts_oldest() {
	let mut config = ServerConfig::default();
	config.auth.max_sessions = 2;
	let app = setup_with(config);

	let first = app.sign_up("a@example.com").await;
	let second = app.sign_up("b@example.com").await;
	let third = app.sign_up("c@example.com").await;
	assert_eq!(app.state.sessions.len().await, 2);

	let response = app.get_with("/en/dashboard", None, Some(&first)).await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	for cookie in [&second, &third] {
		let response = app.get_with("/en/dashboard", None, Some(cookie)).await;
		assert_eq!(response.status(), StatusCode::OK);
	}
}
