//! Row models and DTOs for the two entity sets.

pub mod job;
pub mod user;
