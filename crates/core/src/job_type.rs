//! Employment type enum for job postings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five accepted employment types.
///
/// Serialized with their human-facing hyphenated names (`"Full-Time"` etc.)
/// both over the wire and in the `jobs.type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    Remote,
    Internship,
    Contract,
}

impl JobType {
    /// All accepted wire names, for validation error messages.
    pub const ALL: [&'static str; 5] = [
        "Full-Time",
        "Part-Time",
        "Remote",
        "Internship",
        "Contract",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-Time",
            JobType::PartTime => "Part-Time",
            JobType::Remote => "Remote",
            JobType::Internship => "Internship",
            JobType::Contract => "Contract",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full-Time" => Ok(JobType::FullTime),
            "Part-Time" => Ok(JobType::PartTime),
            "Remote" => Ok(JobType::Remote),
            "Internship" => Ok(JobType::Internship),
            "Contract" => Ok(JobType::Contract),
            _ => Err(()),
        }
    }
}
