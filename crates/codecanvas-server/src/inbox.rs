// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-process inbox for submitted service requests and ratings.
//!
//! Delivery to the configured recipient is logged rather than sent.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::validation::{ServiceRating, ServiceRequest};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission<T> {
	pub id: Uuid,
	pub received_at: DateTime<Utc>,
	#[serde(flatten)]
	pub payload: T,
}

impl<T> Submission<T> {
	fn new(payload: T) -> Self {
		Self {
			id: Uuid::new_v4(),
			received_at: Utc::now(),
			payload,
		}
	}
}

pub struct SubmissionInbox {
	recipient: String,
	requests: RwLock<Vec<Submission<ServiceRequest>>>,
	ratings: RwLock<Vec<Submission<ServiceRating>>>,
}

impl SubmissionInbox {
	pub fn new(recipient: impl Into<String>) -> Self {
		Self {
			recipient: recipient.into(),
			requests: RwLock::new(Vec::new()),
			ratings: RwLock::new(Vec::new()),
		}
	}

	pub fn recipient(&self) -> &str {
		&self.recipient
	}

	#[instrument(skip(self, request), fields(email = %request.email))]
	pub async fn submit_request(&self, request: ServiceRequest) -> Uuid {
		let submission = Submission::new(request);
		let id = submission.id;
		info!(
			%id,
			recipient = %self.recipient,
			"service request received; forwarding to recipient"
		);
		self.requests.write().await.push(submission);
		id
	}

	#[instrument(skip(self, rating), fields(service_id = %rating.service_id, rating = rating.rating))]
	pub async fn submit_rating(&self, rating: ServiceRating) -> Uuid {
		let submission = Submission::new(rating);
		let id = submission.id;
		info!(%id, "service rating received");
		self.ratings.write().await.push(submission);
		id
	}

	pub async fn requests(&self) -> Vec<Submission<ServiceRequest>> {
		self.requests.read().await.clone()
	}

	pub async fn ratings(&self) -> Vec<Submission<ServiceRating>> {
		self.ratings.read().await.clone()
	}

	pub async fn request_count(&self) -> usize {
		self.requests.read().await.len()
	}

	pub async fn rating_count(&self) -> usize {
		self.ratings.read().await.len()
	}

	/// Average and count of recorded ratings for `service_id`.
	pub async fn rating_summary(&self, service_id: &str) -> Option<(f32, usize)> {
		let ratings = self.ratings.read().await;
		let scores: Vec<u8> = ratings
			.iter()
			.filter(|s| s.payload.service_id == service_id)
			.map(|s| s.payload.rating)
			.collect();
		if scores.is_empty() {
			return None;
		}
		let total: u32 = scores.iter().map(|&r| u32::from(r)).sum();
		Some((total as f32 / scores.len() as f32, scores.len()))
	}
}
