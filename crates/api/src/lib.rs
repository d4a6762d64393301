//! Tunebook API server library.
//!
//! Exposes the building blocks (config, state, error handling, limiter,
//! routes) so integration tests and the binary entrypoint share the same
//! router and middleware stack.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod limiter;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
