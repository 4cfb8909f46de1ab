//! Repository structs, one per table.

mod role_repo;
mod stamp_repo;
mod user_repo;

pub use role_repo::RoleRepo;
pub use stamp_repo::StampRepo;
pub use user_repo::UserRepo;
