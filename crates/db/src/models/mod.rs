//! Record structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` record struct matching the database row
//! - A create DTO carrying the validated insert fields
//! - An update DTO (all `Option` fields) for partial replaces, where the
//!   record kind supports updates
//!
//! Records serialize with camelCase field names and the id as `_id`, which is
//! the shape the frontend consumes.

pub mod client;
pub mod contact;
pub mod newsletter;
pub mod project;
