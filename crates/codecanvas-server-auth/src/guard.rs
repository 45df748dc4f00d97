// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route guard for pages that require a signed-in user.

use codecanvas_common_i18n::{localized_href, Locale};
use tokio::sync::watch;

use crate::types::AuthState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
	/// Auth state is still loading; render the loading indicator.
	Wait,
	/// A user is signed in; render the protected content.
	Allow,
	/// Nobody is signed in; navigate to the login page.
	Redirect(String),
}

pub struct RouteGuard;

impl RouteGuard {
	pub fn decide(state: &AuthState, lang: Locale) -> GuardDecision {
		if state.loading {
			GuardDecision::Wait
		} else if state.user.is_some() {
			GuardDecision::Allow
		} else {
			GuardDecision::Redirect(localized_href(lang, "login"))
		}
	}

	/// Wait for loading to clear and return the single final decision.
	///
	/// A closed channel counts as signed out.
	pub async fn run(mut rx: watch::Receiver<AuthState>, lang: Locale) -> GuardDecision {
		let decision = match rx.wait_for(|state| !state.loading).await {
			Ok(state) => Self::decide(&state, lang),
			Err(_) => GuardDecision::Redirect(localized_href(lang, "login")),
		};
		decision
	}
}
