// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Page handlers.
//!
//! Every page is reached under a locale prefix, so handlers take the locale
//! from [`RequestLocale`] rather than from the path. Dashboard pages go
//! through the route guard first.

use std::sync::Arc;

use axum::{
	extract::{Path, State},
	http::{HeaderMap, StatusCode, Uri},
	response::{Html, IntoResponse, Redirect, Response},
};
use codecanvas_common_i18n::{Dictionary, Locale};
use codecanvas_server_auth::{GuardDecision, RouteGuard, User};

use crate::{
	api::AppState,
	catalog::{Project, Service},
	locale_middleware::RequestLocale,
	render::{self, escape, PageContext},
};

/// Per-request page inputs.
struct Page {
	locale: Locale,
	dictionary: Arc<Dictionary>,
	path: String,
	user: Option<User>,
}

impl Page {
	async fn load(state: &AppState, locale: RequestLocale, uri: &Uri, headers: &HeaderMap) -> Self {
		let auth = state.sessions.auth_state(headers).await;
		Self {
			locale: locale.locale(),
			dictionary: state.dictionaries.get(locale.locale()),
			path: uri.path().to_string(),
			user: auth.user,
		}
	}

	fn ctx(&self) -> PageContext<'_> {
		PageContext {
			locale: self.locale,
			dictionary: &self.dictionary,
			path: &self.path,
			user: self.user.as_ref(),
		}
	}

	fn t<'a>(&'a self, key: &'a str) -> &'a str {
		self.dictionary.text(key)
	}

	fn render(&self, title: &str, body: &str) -> Html<String> {
		Html(render::document(&self.ctx(), title, body))
	}

	fn not_found(&self, title_key: &str, description_key: &str) -> Response {
		let body = format!(
			r#"<h1>{}</h1><p>{}</p><a href="{}">{}</a>"#,
			escape(self.t(title_key)),
			escape(self.t(description_key)),
			escape(&self.ctx().href("")),
			escape(self.t("navHome")),
		);
		(StatusCode::NOT_FOUND, self.render(self.t(title_key), &body)).into_response()
	}
}

/// Run the route guard for a dashboard page.
///
/// Waits for the session's auth state to settle and yields the signed-in
/// user, or a 303 to the localized login page.
async fn require_user(state: &AppState, page: &Page, headers: &HeaderMap) -> Result<User, Response> {
	let decision = match state.sessions.find(headers).await {
		Some(session) => RouteGuard::run(session.store.subscribe(), page.locale).await,
		None => RouteGuard::decide(&state.sessions.auth_state(headers).await, page.locale),
	};

	match (decision, page.user.clone()) {
		(GuardDecision::Allow, Some(user)) => Ok(user),
		(GuardDecision::Wait, _) => {
			let body = format!(r#"<p class="loading">{}</p>"#, escape(page.t("loadingText")));
			Err(page.render(page.t("loadingText"), &body).into_response())
		}
		(GuardDecision::Redirect(target), _) => {
			tracing::debug!(%target, path = %page.path, "guarded page requires sign-in");
			Err(Redirect::to(&target).into_response())
		}
		(GuardDecision::Allow, None) => {
			Err(Redirect::to(&page.ctx().href("login")).into_response())
		}
	}
}

fn service_card(page: &Page, service: &Service) -> String {
	format!(
		r#"<article class="service"><h3>{}</h3><p>{}</p>{}<a href="{}">{}</a></article>"#,
		escape(service.title),
		escape(service.short_description),
		render::tag_list(service.tags),
		escape(&page.ctx().href(&format!("services/{}", service.id))),
		escape(page.t("serviceViewDetails")),
	)
}

fn project_card(page: &Page, project: &Project) -> String {
	let mut links = String::new();
	if let Some(url) = project.live_demo_url {
		links.push_str(&format!(
			r#"<a href="{}">{}</a>"#,
			escape(url),
			escape(page.t("projectLiveDemo"))
		));
	}
	if let Some(url) = project.github_url {
		links.push_str(&format!(
			r#"<a href="{}">{}</a>"#,
			escape(url),
			escape(page.t("projectSourceCode"))
		));
	}
	format!(
		r#"<article class="project"><h3>{}</h3><p>{}</p>{}{}</article>"#,
		escape(project.title),
		escape(project.description),
		render::tag_list(project.technologies),
		links,
	)
}

fn form_field(name: &str, label: &str, kind: &str) -> String {
	let label = escape(label);
	match kind {
		"textarea" => format!(
			r#"<label for="{name}">{label}</label><textarea id="{name}" name="{name}" rows="5"></textarea>"#
		),
		_ => format!(
			r#"<label for="{name}">{label}</label><input id="{name}" name="{name}" type="{kind}">"#
		),
	}
}

fn auth_form(page: &Page, action: &str, fields: &[(&str, &str, &str)], submit_key: &str) -> String {
	let mut form = format!(r#"<form method="post" action="{action}" data-locale="{}">"#, page.locale);
	for (name, key, kind) in fields {
		form.push_str(&form_field(name, page.t(key), kind));
	}
	form.push_str(&format!(
		r#"<button type="submit">{}</button></form>"#,
		escape(page.t(submit_key))
	));
	form
}

fn oauth_buttons(page: &Page) -> String {
	format!(
		r#"<div class="oauth"><button data-provider="google">{}</button><button data-provider="github">{}</button></div>"#,
		escape(page.t("loginWithGoogle")),
		escape(page.t("loginWithGitHub")),
	)
}

/// GET /{lang}
pub async fn home(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Html<String> {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let ctx = page.ctx();

	let mut body = format!(
		r#"<section class="hero"><h1>{}</h1><p>{}</p><a href="{}">{}</a><a href="{}">{}</a></section>"#,
		escape(page.t("heroTitle")),
		escape(page.t("heroSubtitle")),
		escape(&ctx.href("services")),
		escape(page.t("heroCtaServices")),
		escape(&ctx.href("contact")),
		escape(page.t("heroCtaContact")),
	);

	body.push_str(r#"<section id="services">"#);
	body.push_str(&render::heading(
		page.t("servicesPageTitle"),
		Some(page.t("servicesPageSubtitle")),
	));
	for service in state.catalog.services() {
		body.push_str(&service_card(&page, service));
	}
	body.push_str("</section>");

	body.push_str(r#"<section id="projects">"#);
	body.push_str(&render::heading(
		page.t("ourPortfolioTitle"),
		Some(page.t("ourPortfolioSubtitle")),
	));
	for project in state.catalog.projects() {
		body.push_str(&project_card(&page, project));
	}
	body.push_str("</section>");

	page.render(page.t("navHome"), &body)
}

/// GET /{lang}/services
pub async fn services(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Html<String> {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let mut body = render::heading(
		page.t("servicesPageTitle"),
		Some(page.t("servicesPageSubtitle")),
	);
	for service in state.catalog.services() {
		body.push_str(&service_card(&page, service));
	}
	page.render(page.t("servicesPageTitle"), &body)
}

fn rating_input(page: &Page, service: &Service) -> String {
	match &page.user {
		Some(user) => format!(
			r#"<form class="rating" data-service-id="{}" data-user-id="{}"><input name="rating" type="number" min="1" max="5"><textarea name="comment" maxlength="500" placeholder="{}"></textarea><button type="submit">{}</button></form>"#,
			escape(service.id),
			escape(&user.uid),
			escape(page.t("starRatingInputCommentPlaceholder")),
			escape(page.t("starRatingInputSubmitButton")),
		),
		None => {
			let login = format!(r#"<a href="{}">"#, escape(&page.ctx().href("login")));
			let prompt = escape(page.t("starRatingInputLoginPrompt"))
				.replace("&lt;1&gt;", &login)
				.replace("&lt;/1&gt;", "</a>");
			format!(r#"<p class="rating-login">{prompt}</p>"#)
		}
	}
}

/// GET /{lang}/services/{service_id}
pub async fn service_detail(
	State(state): State<AppState>,
	locale: RequestLocale,
	Path((_lang, service_id)): Path<(String, String)>,
	uri: Uri,
	headers: HeaderMap,
) -> Response {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let Some(service) = state.catalog.find_service(&service_id) else {
		tracing::debug!(%service_id, "unknown service");
		return page.not_found("serviceNotFoundTitle", "serviceNotFoundDescription");
	};

	let mut body = render::heading(service.title, Some(service.short_description));

	let summary = state.inbox.rating_summary(service.id).await;
	let rating = match (service.average_rating, service.number_of_ratings, summary) {
		(Some(avg), Some(count), None) => Some((avg, count as usize)),
		(Some(avg), Some(count), Some((live_avg, live_count))) => {
			let total = avg * count as f32 + live_avg * live_count as f32;
			let count = count as usize + live_count;
			Some((total / count as f32, count))
		}
		(_, _, live) => live,
	};
	if let Some((avg, count)) = rating {
		body.push_str(&format!(
			r#"<p class="rating">{}</p>"#,
			escape(&page.dictionary.format(
				"serviceDetailRating",
				&[("rating", &format!("{avg:.1}")), ("count", &count.to_string())],
			))
		));
	}

	body.push_str(&format!("<p>{}</p>", escape(service.long_description)));
	body.push_str(&format!(
		"<dl><dt>{}</dt><dd>{}</dd><dt>{}</dt><dd>{}</dd></dl>",
		escape(page.t("serviceDetailPriceModel")),
		escape(service.price_model),
		escape(page.t("serviceDetailTimeframe")),
		escape(service.estimated_timeframe),
	));
	for (key, items) in [
		("serviceDetailTechnologies", service.technologies),
		("serviceDetailFeatures", service.features),
		("serviceDetailDeliverables", service.deliverables),
	] {
		body.push_str(&format!("<h2>{}</h2>", escape(page.t(key))));
		body.push_str(&render::tag_list(items));
	}
	body.push_str(&format!(
		r#"<a class="cta" href="{}">{}</a>"#,
		escape(&page.ctx().href("contact")),
		escape(page.t("serviceDetailRequestButton")),
	));
	body.push_str(&rating_input(&page, service));

	let title = format!("{} - {}", service.title, page.t("navServices"));
	page.render(&title, &body).into_response()
}

/// GET /{lang}/about
pub async fn about(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Html<String> {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let body = render::heading(page.t("aboutPageTitle"), Some(page.t("aboutPageContent")));
	page.render(page.t("aboutPageTitle"), &body)
}

/// GET /{lang}/contact
pub async fn contact(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Html<String> {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let mut body = render::heading(page.t("contactTitle"), Some(page.t("contactSubtitle")));
	body.push_str(&auth_form(
		&page,
		"/api/service-requests",
		&[
			("name", "formName", "text"),
			("email", "formEmailAddress", "email"),
			("company", "formCompany", "text"),
			("description", "formProjectDescription", "textarea"),
			("budget", "formBudget", "text"),
			("timeline", "formTimeline", "text"),
		],
		"formSubmitRequest",
	));
	page.render(page.t("contactTitle"), &body)
}

/// GET /{lang}/value-proposition
pub async fn value_proposition(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Html<String> {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let mut body = render::heading(page.t("valuePropTitle"), Some(page.t("valuePropSubtitle")));
	body.push_str(&auth_form(
		&page,
		"/api/value-propositions",
		&[("technologies", "valuePropTechnologiesLabel", "text")],
		"valuePropGenerateButton",
	));
	body.push_str(&format!(
		r#"<section class="result" hidden><h2>{}</h2><pre></pre></section>"#,
		escape(page.t("valuePropResultTitle"))
	));
	page.render(page.t("valuePropTitle"), &body)
}

/// GET /{lang}/login
pub async fn login(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Html<String> {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let mut body = render::heading(page.t("loginPageTitle"), None);
	body.push_str(&auth_form(
		&page,
		"/api/auth/login",
		&[
			("email", "formEmailAddress", "email"),
			("password", "signupPassword", "password"),
		],
		"loginSignInButton",
	));
	body.push_str(&oauth_buttons(&page));
	body.push_str(&format!(
		r#"<a href="{}">{}</a>"#,
		escape(&page.ctx().href("signup")),
		escape(page.t("loginNoAccount"))
	));
	page.render(page.t("loginPageTitle"), &body)
}

/// GET /{lang}/signup
pub async fn signup(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Html<String> {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let mut body = render::heading(page.t("signupPageTitle"), None);
	body.push_str(&auth_form(
		&page,
		"/api/auth/signup",
		&[
			("email", "formEmailAddress", "email"),
			("password", "signupPassword", "password"),
			("confirmPassword", "signupConfirmPassword", "password"),
		],
		"signupButton",
	));
	body.push_str(&oauth_buttons(&page));
	body.push_str(&format!(
		r#"<a href="{}">{}</a>"#,
		escape(&page.ctx().href("login")),
		escape(page.t("signupHaveAccount"))
	));
	page.render(page.t("signupPageTitle"), &body)
}

/// GET /{lang}/dashboard
pub async fn dashboard(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Response {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let user = match require_user(&state, &page, &headers).await {
		Ok(user) => user,
		Err(response) => return response,
	};

	let welcome = page
		.dictionary
		.format("dashboardWelcome", &[("name", user.label())]);
	let mut body = render::heading(page.t("dashboardTitle"), Some(&welcome));

	let cards = [
		("dashboardOverviewProjects", state.catalog.projects().len()),
		("dashboardOverviewServices", state.catalog.services().len()),
		(
			"dashboardOverviewUsers",
			state.sessions.directory().len().await,
		),
		("dashboardOverviewRequests", state.inbox.request_count().await),
	];
	body.push_str(r#"<section class="overview">"#);
	for (key, count) in cards {
		body.push_str(&format!(
			r#"<div class="card"><h3>{}</h3><p>{count}</p></div>"#,
			escape(page.t(key))
		));
	}
	body.push_str("</section>");

	page.render(page.t("dashboardTitle"), &body).into_response()
}

fn dashboard_section_title(section: &str) -> Option<&'static str> {
	match section.trim_end_matches('/') {
		"projects" => Some("dashboardProjectsTitle"),
		"services" => Some("dashboardServicesTitle"),
		"users" => Some("dashboardUsersTitle"),
		"team" => Some("dashboardTeamTitle"),
		"cms/about" => Some("dashboardCmsAboutTitle"),
		"cms/contact" => Some("dashboardCmsContactTitle"),
		"settings" => Some("dashboardSettingsTitle"),
		_ => None,
	}
}

/// GET /{lang}/dashboard/{section}
///
/// Management pages are placeholders.
pub async fn dashboard_section(
	State(state): State<AppState>,
	locale: RequestLocale,
	Path((_lang, section)): Path<(String, String)>,
	uri: Uri,
	headers: HeaderMap,
) -> Response {
	let page = Page::load(&state, locale, &uri, &headers).await;
	if let Err(response) = require_user(&state, &page, &headers).await {
		return response;
	}

	let Some(title_key) = dashboard_section_title(&section) else {
		return page.not_found("notFoundTitle", "notFoundDescription");
	};
	let body = render::coming_soon(&page.ctx(), page.t(title_key));
	page.render(page.t(title_key), &body).into_response()
}

/// GET /{lang}/chat
pub async fn chat(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Response {
	let page = Page::load(&state, locale, &uri, &headers).await;
	if let Err(response) = require_user(&state, &page, &headers).await {
		return response;
	}

	let mut body = render::heading(page.t("chatPageTitle"), None);
	body.push_str(&format!(
		r#"<div class="chat"><p class="message">{}</p><input disabled placeholder="{}"></div>"#,
		escape(page.t("chatPlaceholderMessage")),
		escape(page.t("comingSoon")),
	));
	page.render(page.t("chatPageTitle"), &body).into_response()
}

/// GET /{lang}/notifications
pub async fn notifications(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Response {
	let page = Page::load(&state, locale, &uri, &headers).await;
	if let Err(response) = require_user(&state, &page, &headers).await {
		return response;
	}

	let body = render::heading(
		page.t("notificationsPageTitle"),
		Some(page.t("notificationsEmpty")),
	);
	page.render(page.t("notificationsPageTitle"), &body).into_response()
}

/// GET /{lang}/profile
pub async fn profile(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Response {
	let page = Page::load(&state, locale, &uri, &headers).await;
	let user = match require_user(&state, &page, &headers).await {
		Ok(user) => user,
		Err(response) => return response,
	};

	let mut body = render::heading(page.t("profilePageTitle"), None);
	body.push_str(&format!(
		"<dl><dt>{}</dt><dd>{}</dd><dt>{}</dt><dd>{}</dd></dl>",
		escape(page.t("profileDisplayName")),
		escape(user.display_name.as_deref().unwrap_or_default()),
		escape(page.t("profileEmail")),
		escape(user.email.as_deref().unwrap_or_default()),
	));
	page.render(page.t("profilePageTitle"), &body).into_response()
}

/// Fallback for unmatched localized paths.
pub async fn not_found(
	State(state): State<AppState>,
	locale: RequestLocale,
	uri: Uri,
	headers: HeaderMap,
) -> Response {
	let page = Page::load(&state, locale, &uri, &headers).await;
	page.not_found("notFoundTitle", "notFoundDescription")
}
