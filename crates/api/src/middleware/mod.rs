//! Request gatekeeping: rate limiting, authentication, authorization.
//!
//! Per-request order is fixed: the rate-limit layer runs before routing,
//! then the extractors resolve identity and check authorization before any
//! handler body executes.

pub mod auth;
pub mod permissions;
pub mod rate_limit;
