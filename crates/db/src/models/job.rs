//! Job posting row model.

use serde::Serialize;
use sqlx::FromRow;

use jobboard_core::types::{DbId, Timestamp};

/// Full job row from the `jobs` table. Serialized directly in API responses;
/// the `type` column keeps its wire name through the rename.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub job_type: String,
    pub title: String,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub location: String,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub created_at: Timestamp,
}
