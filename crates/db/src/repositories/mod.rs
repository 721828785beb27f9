//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Callers are expected to have
//! validated their input; the repositories only talk SQL.

pub mod client_repo;
pub mod contact_repo;
pub mod newsletter_repo;
pub mod project_repo;

pub use client_repo::ClientRepo;
pub use contact_repo::ContactRepo;
pub use newsletter_repo::SubscriptionRepo;
pub use project_repo::ProjectRepo;
