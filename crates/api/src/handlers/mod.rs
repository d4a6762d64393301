//! Request handlers, one module per resource.

pub mod tokens;
pub mod tunes;
pub mod users;
