// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! CodeCanvas web server.
//!
//! Serves the bilingual (English/Arabic) marketing pages and dashboard, the
//! service-request and rating forms, the value-proposition helper and the
//! auth endpoints backing the login and sign-up pages.

pub mod api;
pub mod catalog;
pub mod error;
pub mod inbox;
pub mod locale_middleware;
pub mod render;
pub mod routes;
pub mod session;
pub mod validation;
pub mod value_prop;

pub use api::{create_app_state, create_router, AppState};
pub use codecanvas_server_config::ServerConfig;
pub use error::ServerError;
pub use locale_middleware::RequestLocale;
pub use session::SessionRegistry;
pub use value_prop::{HttpGenerator, TemplateGenerator, ValuePropositionGenerator};
