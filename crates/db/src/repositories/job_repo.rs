//! Repository for the `jobs` table.
//!
//! Listing supports an optional case-insensitive substring search across
//! title/description/location/company name/type, plus LIMIT/OFFSET paging.
//! Results are always ordered newest-first; `id DESC` breaks ties because
//! `CURRENT_TIMESTAMP` has one-second resolution.

use sqlx::SqlitePool;

use jobboard_core::types::DbId;
use jobboard_core::validation::JobInput;

use crate::models::job::Job;

/// Column list for `jobs` queries.
const COLUMNS: &str = "id, type, title, description, salary, location, \
                       company_name, company_description, contact_email, \
                       contact_phone, created_at";

/// Columns the substring search runs against.
const SEARCH_CLAUSE: &str = "(title LIKE ? ESCAPE '\\' \
    OR description LIKE ? ESCAPE '\\' \
    OR location LIKE ? ESCAPE '\\' \
    OR company_name LIKE ? ESCAPE '\\' \
    OR type LIKE ? ESCAPE '\\')";

/// Number of `?` placeholders in [`SEARCH_CLAUSE`].
const SEARCH_BINDS: usize = 5;

/// Maximum page size for job listing.
pub const MAX_LIMIT: i64 = 100;

/// Filter and paging options for [`JobRepo::list`] / [`JobRepo::count`].
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive substring to search for. Empty/whitespace means none.
    pub search: Option<String>,
    /// Page size; clamped to [`MAX_LIMIT`]. `None` returns everything.
    pub limit: Option<i64>,
    /// Row offset; only meaningful together with `limit`.
    pub offset: Option<i64>,
}

impl JobFilter {
    /// The `LIKE` pattern for the search term, with SQL wildcards escaped so
    /// the term matches literally.
    fn like_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        Some(format!("%{escaped}%"))
    }
}

/// Provides CRUD operations for job postings.
pub struct JobRepo;

impl JobRepo {
    /// List jobs ordered by creation time descending, applying the filter.
    pub async fn list(pool: &SqlitePool, filter: &JobFilter) -> Result<Vec<Job>, sqlx::Error> {
        let pattern = filter.like_pattern();

        let mut sql = format!("SELECT {COLUMNS} FROM jobs");
        if pattern.is_some() {
            sql.push_str(" WHERE ");
            sql.push_str(SEARCH_CLAUSE);
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");
        if filter.limit.is_some() {
            sql.push_str(" LIMIT ? OFFSET ?");
        }

        let mut query = sqlx::query_as::<_, Job>(&sql);
        if let Some(pattern) = &pattern {
            for _ in 0..SEARCH_BINDS {
                query = query.bind(pattern.clone());
            }
        }
        if let Some(limit) = filter.limit {
            query = query
                .bind(limit.clamp(1, MAX_LIMIT))
                .bind(filter.offset.unwrap_or(0).max(0));
        }

        query.fetch_all(pool).await
    }

    /// Count jobs matching the filter (ignores paging).
    pub async fn count(pool: &SqlitePool, filter: &JobFilter) -> Result<i64, sqlx::Error> {
        let pattern = filter.like_pattern();

        let mut sql = "SELECT COUNT(*) FROM jobs".to_string();
        if pattern.is_some() {
            sql.push_str(" WHERE ");
            sql.push_str(SEARCH_CLAUSE);
        }

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(pattern) = &pattern {
            for _ in 0..SEARCH_BINDS {
                query = query.bind(pattern.clone());
            }
        }

        query.fetch_one(pool).await
    }

    /// Find a job by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = ?");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new job, returning the created row. The input is assumed
    /// to have passed validation.
    pub async fn create(pool: &SqlitePool, input: &JobInput) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (type, title, description, salary, location, \
                               company_name, company_description, contact_email, contact_phone)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(&input.job_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.salary)
            .bind(&input.location)
            .bind(&input.company_name)
            .bind(&input.company_description)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .fetch_one(pool)
            .await
    }

    /// Replace all mutable columns of a job (PUT semantics).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &JobInput,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET
                type = ?, title = ?, description = ?, salary = ?, location = ?,
                company_name = ?, company_description = ?, contact_email = ?, contact_phone = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(&input.job_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.salary)
            .bind(&input.location)
            .bind(&input.company_name)
            .bind(&input.company_description)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a job. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
