// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Static service catalog and project showcase.
//!
//! Entry content is not translated; only the surrounding page text is.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
	pub id: &'static str,
	pub title: &'static str,
	pub short_description: &'static str,
	pub long_description: &'static str,
	pub technologies: &'static [&'static str],
	pub price_model: &'static str,
	pub estimated_timeframe: &'static str,
	pub tags: &'static [&'static str],
	pub features: &'static [&'static str],
	pub deliverables: &'static [&'static str],
	pub average_rating: Option<f32>,
	pub number_of_ratings: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	pub id: &'static str,
	pub title: &'static str,
	pub description: &'static str,
	pub technologies: &'static [&'static str],
	pub live_demo_url: Option<&'static str>,
	pub github_url: Option<&'static str>,
}

const SERVICES: &[Service] = &[
	Service {
		id: "web-development",
		title: "Custom Web Development",
		short_description: "Fast, accessible web applications built for your business.",
		long_description: "We design and build web applications end to end, from the data model to the last pixel, with performance budgets and automated tests from day one.",
		technologies: &["React", "Next.js", "Node.js", "PostgreSQL"],
		price_model: "Fixed price per milestone",
		estimated_timeframe: "6-12 weeks",
		tags: &["web", "frontend", "backend"],
		features: &[
			"Responsive, accessible UI",
			"Server-side rendering",
			"Admin dashboard",
		],
		deliverables: &["Source code", "Deployment pipeline", "Technical documentation"],
		average_rating: Some(4.8),
		number_of_ratings: Some(32),
	},
	Service {
		id: "mobile-apps",
		title: "Mobile App Development",
		short_description: "Native-quality iOS and Android apps from a single codebase.",
		long_description: "Cross-platform mobile apps with offline support, push notifications and store submission handled for you.",
		technologies: &["Flutter", "Dart", "Firebase"],
		price_model: "Fixed price per milestone",
		estimated_timeframe: "8-16 weeks",
		tags: &["mobile", "ios", "android"],
		features: &["Offline-first data sync", "Push notifications", "In-app purchases"],
		deliverables: &["App store releases", "Source code", "Release playbook"],
		average_rating: Some(4.6),
		number_of_ratings: Some(18),
	},
	Service {
		id: "ai-integration",
		title: "AI Integration",
		short_description: "Bring language models and analytics into your existing products.",
		long_description: "We evaluate, integrate and monitor AI features such as assistants, semantic search and document processing, with guardrails and cost controls.",
		technologies: &["Python", "TypeScript", "Vector databases"],
		price_model: "Time and materials",
		estimated_timeframe: "4-10 weeks",
		tags: &["ai", "automation"],
		features: &["Prompt and retrieval pipelines", "Usage analytics", "Human review workflows"],
		deliverables: &["Integrated feature", "Evaluation report", "Monitoring dashboards"],
		average_rating: Some(4.9),
		number_of_ratings: Some(11),
	},
	Service {
		id: "cloud-devops",
		title: "Cloud & DevOps",
		short_description: "Reliable infrastructure, CI/CD and observability.",
		long_description: "Infrastructure as code, automated delivery and production monitoring so your team can ship with confidence.",
		technologies: &["Docker", "Kubernetes", "Terraform", "GitHub Actions"],
		price_model: "Monthly retainer",
		estimated_timeframe: "Ongoing",
		tags: &["cloud", "devops"],
		features: &["Infrastructure as code", "Zero-downtime deploys", "Alerting and dashboards"],
		deliverables: &["Terraform modules", "CI/CD pipelines", "Runbooks"],
		average_rating: None,
		number_of_ratings: None,
	},
];

const PROJECTS: &[Project] = &[
	Project {
		id: "1",
		title: "E-commerce Platform",
		description: "A full-featured online store with secure payments, product management, and user accounts.",
		technologies: &["React", "Node.js", "PostgreSQL", "Stripe"],
		live_demo_url: Some("#"),
		github_url: Some("#"),
	},
	Project {
		id: "2",
		title: "Social Media App",
		description: "A platform for users to connect, share updates, and interact with content in real-time.",
		technologies: &["Flutter", "Firebase", "Dart"],
		live_demo_url: Some("#"),
		github_url: None,
	},
	Project {
		id: "3",
		title: "Project Management Tool",
		description: "A collaborative tool for teams to manage tasks, track progress, and communicate effectively.",
		technologies: &["Next.js", "TailwindCSS", "Supabase"],
		live_demo_url: None,
		github_url: Some("#"),
	},
	Project {
		id: "4",
		title: "AI Powered Analytics Dashboard",
		description: "An advanced dashboard providing insightful data analytics using machine learning models.",
		technologies: &["Python", "Flask", "React", "D3.js"],
		live_demo_url: Some("#"),
		github_url: Some("#"),
	},
];

#[derive(Debug, Clone, Copy)]
pub struct Catalog {
	services: &'static [Service],
	projects: &'static [Project],
}

impl Default for Catalog {
	fn default() -> Self {
		Self::sample()
	}
}

impl Catalog {
	pub fn sample() -> Self {
		Self {
			services: SERVICES,
			projects: PROJECTS,
		}
	}

	pub fn services(&self) -> &'static [Service] {
		self.services
	}

	pub fn projects(&self) -> &'static [Project] {
		self.projects
	}

	pub fn find_service(&self, id: &str) -> Option<&'static Service> {
		self.services.iter().find(|s| s.id == id)
	}
}
