use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize, Display, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

#[derive(Debug, sqlx::FromRow)]
pub struct JobRow {
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    /// JSON array text
    pub requirements: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// An opening published on the careers page.
#[derive(Debug, Serialize, ToSchema)]
pub struct Job {
    pub id: String,
    #[schema(example = "Site Engineer")]
    pub title: String,
    #[schema(example = "Coimbatore")]
    pub location: String,
    pub description: String,
    #[schema(example = json!(["B.E. Civil", "2+ years site experience"]))]
    pub requirements: Vec<String>,
    pub status: JobStatus,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = serde_json::Error;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Job {
            id: row.id,
            title: row.title,
            location: row.location,
            description: row.description,
            requirements: serde_json::from_str(&row.requirements)?,
            status: row.status,
            created_at: row.created_at,
        })
    }
}
