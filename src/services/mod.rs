//! Outbound services.
//!
//! Services wrap calls to collaborators outside this process.

pub mod account_service;
