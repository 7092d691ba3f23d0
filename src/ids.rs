// Record id generation
//
// Timestamp ids keep the "milliseconds since epoch as a string" format.
// Collisions inside the target sequence are skipped by bumping the
// candidate forward; collisions across concurrent writers are not handled.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Timestamp,
    Uuid,
}

impl IdScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdScheme::Timestamp => "timestamp",
            IdScheme::Uuid => "uuid",
        }
    }

    /// Produce an id not already taken according to `is_taken`
    pub fn next_id<F>(&self, is_taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        match self {
            IdScheme::Timestamp => {
                let mut millis = Utc::now().timestamp_millis();
                let mut candidate = millis.to_string();
                while is_taken(&candidate) {
                    millis += 1;
                    candidate = millis.to_string();
                }
                candidate
            }
            IdScheme::Uuid => loop {
                let candidate = uuid::Uuid::new_v4().to_string();
                if !is_taken(&candidate) {
                    break candidate;
                }
            },
        }
    }
}

impl FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "timestamp" => Ok(IdScheme::Timestamp),
            "uuid" => Ok(IdScheme::Uuid),
            other => Err(format!("unknown id scheme '{}' (expected timestamp or uuid)", other)),
        }
    }
}
