//! Row structs and DTOs for the tunebook schema.

pub mod token;
pub mod tune;
pub mod user;

pub use token::Token;
pub use user::{Identity, User};
