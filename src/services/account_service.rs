//! Client for the downstream account service.
//!
//! The account service owns balances and applies transactions. This module
//! defines the [`AccountService`] port used by the handlers and an HTTP
//! implementation backed by `reqwest`.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use reqwest::Client;
use url::Url;

use crate::models::transaction::{AccountNumber, HeaderBag, TransactionAmount};

/// Error type for account service calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Account service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Port trait for the account service.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Apply a transaction to an account.
    async fn transact(
        &self,
        account_number: AccountNumber,
        amount: TransactionAmount,
    ) -> Result<(), ClientError>;

    /// Apply a transaction while forwarding the caller's headers.
    /// Returns the header bag produced by the account service.
    async fn transaction_headers(
        &self,
        account_number: AccountNumber,
        amount: TransactionAmount,
        headers: &HeaderBag,
    ) -> Result<HeaderBag, ClientError>;
}

/// Headers that describe the inbound connection or body and must not be
/// copied onto the outbound request.
const NON_FORWARDED_HEADERS: &[&str] = &[
    "host",
    "content-length",
    "content-type",
    "transfer-encoding",
    "connection",
    "keep-alive",
    "upgrade",
    "te",
    "trailer",
    "proxy-authorization",
    "proxy-connection",
];

/// Account service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAccountService {
    base_url: String,
    http: Client,
}

impl HttpAccountService {
    /// Creates a client for the account service at `base_url`.
    ///
    /// `timeout` bounds each call; `None` waits until the call completes or fails.
    pub fn new(base_url: &Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    fn endpoint(&self, account_number: AccountNumber, action: &str) -> String {
        format!(
            "{}/api/accounts/{}/{}",
            self.base_url, account_number, action
        )
    }

    async fn post_amount(
        &self,
        url: String,
        amount: &TransactionAmount,
        headers: HeaderMap,
    ) -> Result<reqwest::Response, ClientError> {
        let resp = self
            .http
            .post(url)
            .headers(headers)
            .header(header::CONTENT_TYPE, "application/json")
            .body(amount.to_json_body())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read error body from account service: {}", e);
                    String::new()
                }
            };
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }
}

#[async_trait::async_trait]
impl AccountService for HttpAccountService {
    async fn transact(
        &self,
        account_number: AccountNumber,
        amount: TransactionAmount,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(account_number, "transaction");
        self.post_amount(url, &amount, HeaderMap::new()).await?;
        Ok(())
    }

    async fn transaction_headers(
        &self,
        account_number: AccountNumber,
        amount: TransactionAmount,
        headers: &HeaderBag,
    ) -> Result<HeaderBag, ClientError> {
        let url = self.endpoint(account_number, "transaction-headers");
        let resp = self
            .post_amount(url, &amount, forwarded_headers(headers))
            .await?;

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Build the outbound header map from a header bag.
///
/// Connection and framing headers are dropped, as are names or values that
/// cannot be sent on the wire.
fn forwarded_headers(bag: &HeaderBag) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, values) in bag {
        if NON_FORWARDED_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
            continue;
        }
        let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
            tracing::warn!("Skipping header with invalid name: {}", name);
            continue;
        };
        for value in values {
            match HeaderValue::from_str(value) {
                Ok(v) => {
                    headers.append(header_name.clone(), v);
                }
                Err(_) => tracing::warn!("Skipping invalid value for header {}", name),
            }
        }
    }
    headers
}
