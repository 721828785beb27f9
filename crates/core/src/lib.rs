//! Shared domain types, errors, and field validation rules for the
//! Real Trust content API.

pub mod error;
pub mod types;
pub mod validation;
