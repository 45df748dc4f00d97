// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Form payloads and their validation.
//!
//! Every form is validated in full before anything else happens: field
//! errors are collected per field in the caller's language and returned
//! together, and no provider, generator or inbox call is made for an invalid
//! payload.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use codecanvas_common_i18n::Dictionary;
use codecanvas_server_auth::MIN_PASSWORD_LEN;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_COMMENT_LEN: usize = 500;
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Validate an email address format.
pub fn is_valid_email(email: &str) -> bool {
	EMAIL_REGEX.is_match(email)
}

/// Sanitize an email address by trimming whitespace and lowercasing.
pub fn sanitize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

/// Field name → localized messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, field: &str, message: impl Into<String>) {
		self.0
			.entry(field.to_string())
			.or_default()
			.push(message.into());
	}

	pub fn get(&self, field: &str) -> Option<&[String]> {
		self.0.get(field).map(Vec::as_slice)
	}

	pub fn contains(&self, field: &str) -> bool {
		self.0.contains_key(field)
	}

	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
		if self.is_empty() {
			Ok(value)
		} else {
			Err(self)
		}
	}
}

/// Response body shared by the form endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct FormResponse {
	pub success: bool,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub errors: Option<FieldErrors>,
}

impl FormResponse {
	pub fn success(message: impl Into<String>) -> Self {
		Self {
			success: true,
			message: message.into(),
			errors: None,
		}
	}

	pub fn invalid(errors: FieldErrors, dictionary: &Dictionary) -> Self {
		Self {
			success: false,
			message: dictionary.text("validationFailedMessage").to_string(),
			errors: Some(errors),
		}
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}

fn check_email(errors: &mut FieldErrors, email: &str, dictionary: &Dictionary) {
	if !is_valid_email(email) {
		errors.add("email", dictionary.text("validationEmailInvalid"));
	}
}

fn check_password(errors: &mut FieldErrors, password: &str, dictionary: &Dictionary) {
	if password.chars().count() < MIN_PASSWORD_LEN {
		errors.add("password", dictionary.text("validationPasswordMin"));
	}
}

// Service request

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceRequestInput {
	pub name: String,
	pub email: String,
	pub company: Option<String>,
	pub description: String,
	pub budget: Option<String>,
	pub timeline: Option<String>,
}

/// A validated service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
	pub name: String,
	pub email: String,
	pub company: Option<String>,
	pub description: String,
	pub budget: Option<String>,
	pub timeline: Option<String>,
}

pub fn validate_service_request(
	input: ServiceRequestInput,
	dictionary: &Dictionary,
) -> Result<ServiceRequest, FieldErrors> {
	let mut errors = FieldErrors::new();

	let name = input.name.trim().to_string();
	if name.chars().count() < MIN_NAME_LEN {
		errors.add("name", dictionary.text("validationNameMin"));
	}

	let email = sanitize_email(&input.email);
	check_email(&mut errors, &email, dictionary);

	let description = input.description.trim().to_string();
	let description_len = description.chars().count();
	if description_len < MIN_DESCRIPTION_LEN {
		errors.add("description", dictionary.text("validationDescriptionMin"));
	} else if description_len > MAX_DESCRIPTION_LEN {
		errors.add("description", dictionary.text("validationDescriptionMax"));
	}

	errors.into_result(ServiceRequest {
		name,
		email,
		company: non_empty(input.company),
		description,
		budget: non_empty(input.budget),
		timeline: non_empty(input.timeline),
	})
}

// Service rating

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceRatingInput {
	pub service_id: String,
	pub user_id: String,
	pub rating: Option<i64>,
	pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRating {
	pub service_id: String,
	pub user_id: String,
	pub rating: u8,
	pub comment: Option<String>,
}

pub fn validate_service_rating(
	input: ServiceRatingInput,
	dictionary: &Dictionary,
) -> Result<ServiceRating, FieldErrors> {
	let mut errors = FieldErrors::new();

	let service_id = input.service_id.trim().to_string();
	if service_id.is_empty() {
		errors.add("serviceId", dictionary.text("validationServiceIdRequired"));
	}

	let user_id = input.user_id.trim().to_string();
	if user_id.is_empty() {
		errors.add("userId", dictionary.text("validationUserIdRequired"));
	}

	let rating = match input.rating {
		Some(r @ MIN_RATING..=MAX_RATING) => r as u8,
		_ => {
			errors.add("rating", dictionary.text("validationRatingRange"));
			0
		}
	};

	let comment = non_empty(input.comment);
	if comment
		.as_deref()
		.is_some_and(|c| c.chars().count() > MAX_COMMENT_LEN)
	{
		errors.add("comment", dictionary.text("validationCommentTooLong"));
	}

	errors.into_result(ServiceRating {
		service_id,
		user_id,
		rating,
		comment,
	})
}

// Auth forms

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginInput {
	pub email: String,
	pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupInput {
	pub email: String,
	pub password: String,
	pub confirm_password: String,
}

/// Validated email/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
	pub email: String,
	pub password: String,
}

pub fn validate_login(input: LoginInput, dictionary: &Dictionary) -> Result<Credentials, FieldErrors> {
	let mut errors = FieldErrors::new();
	let email = sanitize_email(&input.email);
	check_email(&mut errors, &email, dictionary);
	check_password(&mut errors, &input.password, dictionary);

	errors.into_result(Credentials {
		email,
		password: input.password,
	})
}

pub fn validate_signup(
	input: SignupInput,
	dictionary: &Dictionary,
) -> Result<Credentials, FieldErrors> {
	let mut errors = FieldErrors::new();
	let email = sanitize_email(&input.email);
	check_email(&mut errors, &email, dictionary);
	check_password(&mut errors, &input.password, dictionary);

	if input.password != input.confirm_password {
		errors.add("confirmPassword", dictionary.text("validationPasswordMismatch"));
	}

	errors.into_result(Credentials {
		email,
		password: input.password,
	})
}

// Value propositions

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValuePropositionInput {
	/// Comma-separated technology names.
	pub technologies: String,
}

/// Split the comma-separated list, dropping blanks and repeats.
pub fn parse_technologies(raw: &str) -> Vec<String> {
	let mut technologies: Vec<String> = Vec::new();
	for tech in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
		if !technologies.iter().any(|t| t.eq_ignore_ascii_case(tech)) {
			technologies.push(tech.to_string());
		}
	}
	technologies
}

pub fn validate_value_proposition(
	input: ValuePropositionInput,
	dictionary: &Dictionary,
) -> Result<Vec<String>, FieldErrors> {
	let mut errors = FieldErrors::new();
	let technologies = parse_technologies(&input.technologies);
	if technologies.is_empty() {
		errors.add("technologies", dictionary.text("validationTechnologiesRequired"));
	}
	errors.into_result(technologies)
}
