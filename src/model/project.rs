use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, ToSchema, sqlx::Type)]
pub enum ProjectStatus {
    Ongoing,
    Completed,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "c3c1d6f0-5b1a-4f1e-8a57-2b1f0e9d7a44",
        "title": "Anna Nagar Residency",
        "description": "G+4 residential block",
        "status": "Ongoing",
        "employees": 2,
        "location": "Chennai",
        "estimation": 180.0,
        "assignedEmployeeIds": ["0b8f3a8e-2f4e-4d7b-9a0c-3f4b6a1d2e11", "6d2b0c1e-1f0a-4b8e-b2d3-7c6e5f4a3b21"],
        "created_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Size of `assigned_employee_ids` once any assignment has happened.
    pub employees: i64,
    pub location: String,
    /// Estimated duration in days.
    pub estimation: f64,
    #[sqlx(skip)]
    #[serde(rename = "assignedEmployeeIds")]
    pub assigned_employee_ids: Vec<String>,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
