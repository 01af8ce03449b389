//! Input DTOs and their field-level validation rules.
//!
//! Whole-request policy: every rule is evaluated and the full list of
//! [`FieldError`]s is returned, so a client can render all problems at once.
//! A request with any failing field is rejected before it reaches the store.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::FieldError;
use crate::job_type::JobType;

/// Minimum registration password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Create/update payload for a job posting.
///
/// Field names match the wire contract (and the `jobs` table columns);
/// `type` is renamed because it is a Rust keyword.
#[derive(Debug, Clone, Deserialize)]
pub struct JobInput {
    #[serde(rename = "type")]
    pub job_type: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    pub location: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_description: Option<String>,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

impl JobInput {
    /// Evaluate all field rules. `Ok(())` means the payload may be persisted.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.job_type.trim().is_empty() {
            errors.push(FieldError::new("type", "Job type is required"));
        } else if self.job_type.parse::<JobType>().is_err() {
            errors.push(FieldError::new(
                "type",
                format!("Job type must be one of: {}", JobType::ALL.join(", ")),
            ));
        }

        check_required_length(&mut errors, "title", &self.title, 3, 50, "Job title");
        check_required_length(&mut errors, "location", &self.location, 2, 60, "Location");

        if self.contact_email.trim().is_empty() {
            errors.push(FieldError::new("contact_email", "Contact email is required"));
        } else if !is_valid_email(self.contact_email.trim()) {
            errors.push(FieldError::new(
                "contact_email",
                "Contact email must be a valid email address",
            ));
        }

        if let Some(desc) = non_empty(&self.description) {
            if desc.chars().count() < 10 {
                errors.push(FieldError::new(
                    "description",
                    "Description must be at least 10 characters",
                ));
            }
        }

        if let Some(name) = non_empty(&self.company_name) {
            let len = name.chars().count();
            if !(3..=50).contains(&len) {
                errors.push(FieldError::new(
                    "company_name",
                    "Company name must be between 3 and 50 characters",
                ));
            }
        }

        if let Some(desc) = non_empty(&self.company_description) {
            if desc.chars().count() < 10 {
                errors.push(FieldError::new(
                    "company_description",
                    "Company description must be at least 10 characters",
                ));
            }
        }

        if let Some(phone) = non_empty(&self.contact_phone) {
            if !is_valid_phone(phone) {
                errors.push(FieldError::new(
                    "contact_phone",
                    "Contact phone may only contain digits, spaces, and + - ( ) . \
                     and must be 7 to 20 characters",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The parsed employment type. Only meaningful after [`validate`] passed.
    ///
    /// [`validate`]: JobInput::validate
    pub fn parsed_type(&self) -> Option<JobType> {
        self.job_type.parse().ok()
    }
}

/// Registration payload for `POST /api/users/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterInput {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < 2 {
            errors.push(FieldError::new(
                "name",
                "Name must be at least 2 characters long",
            ));
        }

        if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "Invalid email address"));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Login payload for `POST /api/users/login`. Never validated field-by-field;
/// a malformed login attempt gets the same generic rejection as a wrong one.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9+\-().\s]{7,20}$").unwrap())
}

/// Loose email shape check: one `@`, a dot in the domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Phone numbers are digits plus the usual separators, 7 to 20 characters.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// Treat `None`, empty, and whitespace-only optional fields as absent.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn check_required_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    label: &str,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
        return;
    }
    let len = trimmed.chars().count();
    if len < min {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at least {min} characters"),
        ));
    } else if len > max {
        errors.push(FieldError::new(
            field,
            format!("{label} cannot exceed {max} characters"),
        ));
    }
}
