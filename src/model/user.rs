use crate::model::role::Role;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// What a client may see of a user. Never carries the hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicUser {
    #[schema(example = "4f1c2a9e-7c1d-4c55-9a61-0d3e2f6b8a10")]
    pub id: String,
    #[schema(example = "Ravi")]
    pub name: String,
    #[schema(example = "ravi@vishakan.com")]
    pub email: String,
    pub role: Role,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
