//! Trait definitions for Dependency-Track resource operations.
//!
//! Each resource type implements the traits its endpoints support. Every
//! implementation checks its own minimum server version first, because
//! operations on one resource were introduced in different releases.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use update::Update;
