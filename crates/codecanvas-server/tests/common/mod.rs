// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared helpers for router integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
	body::{to_bytes, Body},
	http::{
		header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
		Request, Response,
	},
	Router,
};
use codecanvas_common_i18n::Locale;
use codecanvas_server::{
	api::build_app_state, create_router, value_prop::GeneratorError, AppState, ServerConfig,
	TemplateGenerator, ValuePropositionGenerator,
};
use tower::ServiceExt;

/// Template generator that counts invocations.
#[derive(Default)]
pub struct CountingGenerator {
	pub calls: AtomicUsize,
}

impl CountingGenerator {
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ValuePropositionGenerator for CountingGenerator {
	fn name(&self) -> &'static str {
		"counting"
	}

	async fn generate(
		&self,
		technologies: &[String],
		locale: Locale,
	) -> Result<String, GeneratorError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		TemplateGenerator.generate(technologies, locale).await
	}
}

pub struct TestApp {
	pub router: Router,
	pub state: AppState,
	pub generator: Arc<CountingGenerator>,
}

pub fn setup_with(config: ServerConfig) -> TestApp {
	let generator = Arc::new(CountingGenerator::default());
	let state = build_app_state(&config, generator.clone()).unwrap();
	TestApp {
		router: create_router(state.clone()),
		state,
		generator,
	}
}

pub fn setup() -> TestApp {
	setup_with(ServerConfig::default())
}

impl TestApp {
	pub async fn send(&self, request: Request<Body>) -> Response<Body> {
		self.router.clone().oneshot(request).await.unwrap()
	}

	pub async fn get(&self, uri: &str) -> Response<Body> {
		self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
	}

	pub async fn get_with(&self, uri: &str, lang: Option<&str>, cookie: Option<&str>) -> Response<Body> {
		let mut builder = Request::builder().uri(uri);
		if let Some(lang) = lang {
			builder = builder.header(ACCEPT_LANGUAGE, lang);
		}
		if let Some(cookie) = cookie {
			builder = builder.header(COOKIE, cookie);
		}
		self.send(builder.body(Body::empty()).unwrap()).await
	}

	pub async fn post_json(
		&self,
		uri: &str,
		body: serde_json::Value,
		lang: Option<&str>,
		cookie: Option<&str>,
	) -> Response<Body> {
		let mut builder = Request::builder()
			.method("POST")
			.uri(uri)
			.header(CONTENT_TYPE, "application/json");
		if let Some(lang) = lang {
			builder = builder.header(ACCEPT_LANGUAGE, lang);
		}
		if let Some(cookie) = cookie {
			builder = builder.header(COOKIE, cookie);
		}
		self.send(builder.body(Body::from(body.to_string())).unwrap())
			.await
	}

	/// Sign up `email` and return the session cookie pair.
	pub async fn sign_up(&self, email: &str) -> String {
		let response = self
			.post_json(
				"/api/auth/signup",
				serde_json::json!({
					"email": email,
					"password": "secret1",
					"confirmPassword": "secret1",
				}),
				None,
				None,
			)
			.await;
		assert_eq!(response.status(), 200);
		session_cookie(&response).expect("signup sets a session cookie")
	}
}

pub fn location(response: &Response<Body>) -> Option<String> {
	response
		.headers()
		.get(LOCATION)
		.and_then(|v| v.to_str().ok())
		.map(str::to_string)
}

/// The `name=value` pair from the response's Set-Cookie header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
	let header = response.headers().get(SET_COOKIE)?.to_str().ok()?;
	header.split(';').next().map(str::to_string)
}

pub async fn body_text(response: Response<Body>) -> String {
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}
