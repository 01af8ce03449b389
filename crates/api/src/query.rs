//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /api/jobs` (`?search=&page=&limit=`).
///
/// When neither `page` nor `limit` is given, the handler returns the legacy
/// bare-array shape; otherwise it returns the pagination envelope.
#[derive(Debug, Default, Deserialize)]
pub struct JobListParams {
    /// Case-insensitive substring matched against title, description,
    /// location, company name, and type.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
}

impl JobListParams {
    /// Whether the caller asked for the pagination envelope.
    pub fn paginated(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }
}
