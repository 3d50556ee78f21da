//! Transaction Service
//!
//! A thin REST front for the account service: transactions posted here are
//! forwarded to the account service and its result is relayed to the caller.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Downstream**: account service over HTTP (reqwest)
//! - **Format**: decimal request bodies, JSON responses

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::services::account_service::AccountService;

/// State shared with every handler.
///
/// The account service is injected here so tests can point it at a stub.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountService>,
}

impl AppState {
    pub fn new(account_service: impl AccountService + 'static) -> Self {
        Self {
            account_service: Arc::new(account_service),
        }
    }
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/transactions/{acct_number}",
            post(handlers::transactions::new_transaction),
        )
        .route(
            "/api/transactions/{acct_number}/headers",
            post(handlers::transactions::new_transaction_headers),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
