use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A person who has quit smoking. `id` doubles as the sign-in username.
#[derive(Serialize, Deserialize, Clone, JsonSchema)]
pub struct Smoker {
    pub id: String,
    pub name: String,
    /// Sign-in credential. Accepted on input, never written back out.
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub experience: Option<i64>,
    #[serde(rename = "StoppedSmoking")]
    pub stopped_smoking: DateTime<Utc>,
    /// Set by the store when the record is inserted.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Smoker {
    pub fn password_matches(&self, candidate: &str) -> bool {
        !self.password.is_empty() && self.password == candidate
    }

    /// Applies an edit in place. The id and creation time are never touched.
    pub fn apply(&mut self, changes: SmokerUpdate) {
        self.name = changes.name;
        self.experience = changes.experience;
        self.stopped_smoking = changes.stopped_smoking;
        if let Some(password) = changes.password {
            self.password = password;
        }
    }
}

impl fmt::Debug for Smoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Smoker")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("experience", &self.experience)
            .field("stopped_smoking", &self.stopped_smoking)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Body of `PUT /smokers/{id}`.
#[derive(Deserialize, Debug, Clone)]
pub struct SmokerUpdate {
    pub name: String,
    #[serde(default)]
    pub experience: Option<i64>,
    #[serde(rename = "StoppedSmoking")]
    pub stopped_smoking: DateTime<Utc>,
    #[serde(default)]
    pub password: Option<String>,
}
