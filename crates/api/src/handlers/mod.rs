//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to the corresponding repository in
//! `jobboard_db`, and map errors via [`crate::error::AppError`].

pub mod jobs;
pub mod users;
