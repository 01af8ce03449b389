//! Domain types shared by the job board backend.
//!
//! Holds the error taxonomy, role constants, the job type enum, and the
//! input DTOs with their field-level validation rules. Contains no I/O;
//! persistence lives in `jobboard-db` and HTTP concerns in `jobboard-api`.

pub mod error;
pub mod job_type;
pub mod roles;
pub mod types;
pub mod validation;
