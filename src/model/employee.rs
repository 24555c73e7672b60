use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, ToSchema, sqlx::Type)]
pub enum Position {
    #[serde(rename = "Project Manager")]
    #[strum(serialize = "Project Manager")]
    #[sqlx(rename = "Project Manager")]
    ProjectManager,

    #[serde(rename = "Site Manager")]
    #[strum(serialize = "Site Manager")]
    #[sqlx(rename = "Site Manager")]
    SiteManager,

    #[serde(rename = "Site Supervisor")]
    #[strum(serialize = "Site Supervisor")]
    #[sqlx(rename = "Site Supervisor")]
    SiteSupervisor,

    #[serde(rename = "Site Engineer")]
    #[strum(serialize = "Site Engineer")]
    #[sqlx(rename = "Site Engineer")]
    SiteEngineer,

    Worker,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ContactDetails {
    #[sqlx(rename = "contact_primary")]
    #[schema(example = "+91 98400 12345")]
    pub primary: String,

    #[sqlx(rename = "contact_emergency")]
    #[schema(example = "+91 98400 54321", nullable = true)]
    pub emergency: Option<String>,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "0b8f3a8e-2f4e-4d7b-9a0c-3f4b6a1d2e11",
        "emp_id": "EMP-014",
        "emp_name": "Karthik S",
        "qualification": "B.E. Civil",
        "age": 29,
        "email": "karthik@vishakan.com",
        "contact_details": { "primary": "+91 98400 12345", "emergency": null },
        "position": "Site Engineer",
        "created_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct Employee {
    pub id: String,
    pub emp_id: String,
    pub emp_name: String,
    pub qualification: String,
    pub age: i64,
    pub email: String,
    #[sqlx(flatten)]
    pub contact_details: ContactDetails,
    pub position: Position,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
