use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::role::Role;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};
use tracing::{debug, error};

/// Identity taken from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub role: Role,
}

/// Reads `Authorization: Bearer <token>` and verifies it.
///
/// A missing header is `MissingToken` (401); anything present but unusable,
/// including a non-Bearer scheme, is `InvalidToken` (400).
pub fn authenticate(headers: &HeaderMap, config: &Config) -> Result<AuthUser, ApiError> {
    let header = headers.get(AUTHORIZATION).ok_or(ApiError::MissingToken)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::InvalidToken)?;

    let claims = verify_token(token, &config.jwt_secret).map_err(|e| {
        debug!(error = %e, "Token rejected");
        ApiError::InvalidToken
    })?;

    Ok(AuthUser {
        user_id: claims.user_id,
        role: claims.role,
    })
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // already verified by the middleware
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                error!("Config missing from app data");
                return ready(Err(ApiError::Internal));
            }
        };

        ready(authenticate(req.headers(), config))
    }
}

impl AuthUser {
    pub fn require_manager_or_admin(&self) -> Result<(), ApiError> {
        if self.role.can_manage() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Admin/Manager only".to_string()))
        }
    }
}
