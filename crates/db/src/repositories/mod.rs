//! Stateless repository types, one per table group.

pub mod permission_repo;
pub mod token_repo;
pub mod tune_repo;
pub mod user_repo;

pub use permission_repo::PermissionRepo;
pub use token_repo::TokenRepo;
pub use tune_repo::TuneRepo;
pub use user_repo::UserRepo;
