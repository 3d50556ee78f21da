//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (path params, body, headers)
//! 2. Delegates to the account service
//! 3. Returns HTTP response (JSON, status code)
/// Service health endpoint
pub mod health;
/// Transaction forwarding endpoints
pub mod transactions;
