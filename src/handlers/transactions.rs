//! Transaction HTTP handlers.
//!
//! This module implements the transaction endpoints, both of which forward to
//! the account service:
//! - POST /api/transactions/{acct_number} - Apply a transaction
//! - POST /api/transactions/{acct_number}/headers - Apply a transaction and relay headers

use crate::{
    AppState,
    error::AppError,
    models::transaction::{AccountNumber, HeaderBag, TransactionAmount, header_bag_from},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

/// Submit a transaction for an account.
///
/// # Request Body
///
/// The bare decimal amount, e.g. `142.12`.
///
/// # Response
///
/// - **Success (200 OK)**: empty body
/// - **Error (400)**: body is not a decimal amount
/// - **Error (500)**: the account service call failed
pub async fn new_transaction(
    State(state): State<AppState>,
    Path(account_number): Path<AccountNumber>,
    body: String,
) -> Result<StatusCode, AppError> {
    let amount = TransactionAmount::parse_body(&body)?;
    tracing::info!(account_number, %amount, "Submitting transaction");

    state
        .account_service
        .transact(account_number, amount)
        .await?;

    Ok(StatusCode::OK)
}

/// Submit a transaction and return the headers produced by the account service.
///
/// The caller's request headers are forwarded to the account service.
///
/// # Response (200)
///
/// ```json
/// {
///   "myHeader": ["myValue"]
/// }
/// ```
pub async fn new_transaction_headers(
    State(state): State<AppState>,
    Path(account_number): Path<AccountNumber>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<HeaderBag>, AppError> {
    let amount = TransactionAmount::parse_body(&body)?;
    let inbound = header_bag_from(&headers);
    tracing::info!(account_number, %amount, "Submitting transaction with headers");
    tracing::debug!(?inbound, "Inbound headers");

    let relayed = state
        .account_service
        .transaction_headers(account_number, amount, &inbound)
        .await?;

    Ok(Json(relayed))
}
