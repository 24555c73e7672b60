use crate::model::role::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct SignupReq {
    #[schema(example = "Ravi")]
    pub name: String,
    #[schema(example = "ravi@vishakan.com")]
    pub email: String,
    #[schema(example = "s3cret-pass")]
    pub password: String,
    /// Defaults to `Employee`
    #[serde(default)]
    pub role: Role,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "ravi@vishakan.com")]
    pub email: String,
    #[schema(example = "s3cret-pass")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}
