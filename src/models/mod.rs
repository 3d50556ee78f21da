//! Data models shared by handlers and the account service client.

/// Account number, amount and header bag types
pub mod transaction;
