use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Every failure a handler can report. The display text is the `message`
/// the client sees.
#[derive(Debug, Display, PartialEq)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "{}", _0)]
    DuplicateKey(String),

    #[display(fmt = "Invalid email or password")]
    InvalidCredentials,

    #[display(fmt = "Access Denied")]
    MissingToken,

    #[display(fmt = "Invalid Token")]
    InvalidToken,

    #[display(fmt = "{}", _0)]
    Forbidden(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "Failed to send email: {}", _0)]
    Delivery(String),

    #[display(fmt = "Server error")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::DuplicateKey(_)
            | ApiError::InvalidCredentials
            | ApiError::InvalidToken => StatusCode::BAD_REQUEST,
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Delivery(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                // sqlite: "UNIQUE constraint failed: employees.email"
                let field = db_err
                    .message()
                    .rsplit('.')
                    .next()
                    .unwrap_or("key")
                    .to_string();
                return ApiError::DuplicateKey(format!("Duplicate value for {}", field));
            }
        }

        error!(error = %e, "Database error");
        ApiError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_taxonomy() {
        assert_eq!(ApiError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::DuplicateKey("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Delivery("smtp down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_is_not_leaked_as_duplicate() {
        assert_eq!(ApiError::from(sqlx::Error::RowNotFound), ApiError::Internal);
    }
}
