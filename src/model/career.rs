use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// `pending` moves to `approved` or `denied`. Nothing stops a second decision.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize, Display, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CareerApplication {
    pub id: String,
    #[schema(example = "Priya R")]
    pub name: String,
    #[schema(example = "priya@example.com")]
    pub email: String,
    #[schema(example = "+91 90000 11111")]
    pub phone: String,
    #[schema(example = "Female")]
    pub gender: String,
    #[schema(example = "2022")]
    pub graduation_year: String,
    #[schema(example = "2 years")]
    pub experience: String,
    #[schema(example = "https://drive.example.com/resume.pdf")]
    pub resume_link: String,
    pub status: ApplicationStatus,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
