use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// The position a schedule is filtered under. One calendar shows one
/// job title at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobTitle(String);

impl JobTitle {
    pub fn parse(title: String) -> Result<Self, ValidationError> {
        match title.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Job title cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max job title length is 255 characters".to_string(),
            )),
            _ => Ok(Self(title)),
        }
    }
}

impl AsRef<String> for JobTitle {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl fmt::Display for JobTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn test_valid_job_titles() {
    let valid_titles = ["Chef".to_string(), "a".repeat(255)];
    for valid_title in valid_titles.iter() {
        let parsed = JobTitle::parse(valid_title.to_owned())
            .expect("Failed to parse valid job title");

        assert_eq!(parsed.as_ref(), valid_title);
    }
}

#[test]
fn test_empty_job_titles() {
    let result = JobTitle::parse(String::new());
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().as_ref(), "Job title cannot be empty");
}

#[test]
fn test_long_job_titles() {
    let result = JobTitle::parse("a".repeat(256));
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max job title length is 255 characters"
    );
}
