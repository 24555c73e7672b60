use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A message left through the public contact form.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct MailRequest {
    pub id: String,
    #[schema(example = "Arun")]
    pub name: String,
    #[schema(example = "arun@example.com")]
    pub email: String,
    #[schema(example = "+91 91234 56789")]
    pub phone: String,
    #[schema(example = "Looking for a quote on a duplex house")]
    pub message: String,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub date: DateTime<Utc>,
}
