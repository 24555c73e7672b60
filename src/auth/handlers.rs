use crate::{
    auth::{
        auth::AuthUser,
        jwt::generate_token,
        password::{hash_password, verify_password},
    },
    config::Config,
    error::ApiError,
    model::user::{PublicUser, User},
    models::{LoginReqDto, SignupReq},
    utils::{
        email_cache::EmailRegistry,
        validation::{normalize_email, require_email, require_non_empty},
    },
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

/// true  => email AVAILABLE
/// false => email TAKEN
async fn is_email_available(
    email: &str,
    registry: &EmailRegistry,
    pool: &SqlitePool,
) -> Result<bool, ApiError> {
    // fast positive from the cache
    if registry.is_taken(email).await {
        return Ok(false);
    }

    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? LIMIT 1)",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;

    if exists {
        registry.mark_taken(email).await;
    }

    Ok(!exists)
}

/// Register a user
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupReq,
    responses(
        (status = 201, description = "User registered", body = Object, example = json!({
            "message": "User Registered successfully"
        })),
        (status = 400, description = "Validation failed or user already exists", body = Object, example = json!({
            "message": "User already exists"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_signup", skip(pool, registry, user), fields(email = %user.email))]
pub async fn signup(
    user: web::Json<SignupReq>,
    pool: web::Data<SqlitePool>,
    registry: web::Data<EmailRegistry>,
) -> Result<HttpResponse, ApiError> {
    let SignupReq {
        name,
        email,
        password,
        role,
    } = user.into_inner();
    let email = normalize_email(&email);

    require_non_empty(&[
        ("name", name.as_str()),
        ("email", email.as_str()),
        ("password", password.as_str()),
    ])?;
    require_email(&email)?;

    if !is_email_available(&email, &registry, &pool).await? {
        info!("Signup rejected: email taken");
        return Err(ApiError::DuplicateKey("User already exists".to_string()));
    }

    let hashed = hash_password(&password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        ApiError::Internal
    })?;

    let result = sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(name.trim())
    .bind(&email)
    .bind(hashed)
    .bind(role)
    .bind(Utc::now())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            registry.mark_taken(&email).await;
            info!(%role, "User registered");
            Ok(HttpResponse::Created().json(json!({
                "message": "User Registered successfully"
            })))
        }
        // lost a race with a concurrent signup for the same email
        Err(e) => match ApiError::from(e) {
            ApiError::DuplicateKey(_) => Err(ApiError::DuplicateKey("User already exists".to_string())),
            other => Err(other),
        },
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    message: String,
    token: String,
    user: PublicUser,
}

/// Authenticate and receive a session token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Invalid email or password", body = Object, example = json!({
            "message": "Invalid email or password"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(pool, config, user), fields(email = %user.email))]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let email = normalize_email(&user.email);
    if email.is_empty() || user.password.is_empty() {
        return Err(ApiError::InvalidCredentials);
    }

    debug!("Fetching user from database");

    let db_user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, role, created_at FROM users WHERE email = ?",
    )
    .bind(&email)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| {
        info!("Invalid credentials: user not found");
        ApiError::InvalidCredentials
    })?;

    if let Err(e) = verify_password(&user.password, &db_user.password_hash) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    debug!(user_id = %db_user.id, "Password verified, issuing token");

    let (token, _) = generate_token(
        &db_user.id,
        &db_user.email,
        db_user.role,
        &config.jwt_secret,
        config.token_ttl,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to sign token");
        ApiError::Internal
    })?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: db_user.into(),
    }))
}

/// Token-gated echo
#[utoipa::path(
    get,
    path = "/protected",
    responses(
        (status = 200, description = "Token accepted", body = Object, example = json!({
            "message": "Welcome, user with ID: 4f1c2a9e-7c1d-4c55-9a61-0d3e2f6b8a10",
            "role": "Admin"
        })),
        (status = 401, description = "Missing token"),
        (status = 400, description = "Invalid token")
    ),
    tag = "Auth",
    security(("bearer_auth" = []))
)]
pub async fn protected(user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("Welcome, user with ID: {}", user.user_id),
        "role": user.role,
    }))
}

#[cfg(test)]
mod tests {
    use crate::auth::jwt::verify_token;
    use crate::config::Config;
    use crate::db::test_pool;
    use crate::model::role::Role;
    use crate::notify::testing::RecordingMailer;
    use crate::test_support::test_app;
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn user_count(pool: &sqlx::SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn duplicate_signup_fails_without_writing() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let body = json!({"name": "Ravi", "email": "Ravi@Vishakan.com", "password": "pw-1", "role": "Admin"});
        let req = test::TestRequest::post().uri("/signup").set_json(&body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        assert_eq!(user_count(&pool).await, 1);

        // different case, same address
        let again = json!({"name": "Other", "email": "ravi@vishakan.com", "password": "pw-2"});
        let req = test::TestRequest::post().uri("/signup").set_json(&again).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "User already exists");
        assert_eq!(user_count(&pool).await, 1);
    }

    #[actix_web::test]
    async fn stored_password_is_hashed() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({"name": "A", "email": "a@vishakan.com", "password": "plain-text"}))
            .to_request();
        test::call_service(&app, req).await;

        let (hash, role): (String, String) =
            sqlx::query_as("SELECT password_hash, role FROM users WHERE email = 'a@vishakan.com'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_eq!(role, "Employee");
    }

    #[actix_web::test]
    async fn login_issues_token_with_stored_role() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({"name": "Mani", "email": "mani@vishakan.com", "password": "pw", "role": "Manager"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"email": "mani@vishakan.com", "password": "pw"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["role"], "Manager");
        assert!(body["user"].get("password_hash").is_none());

        let claims = verify_token(body["token"].as_str().unwrap(), &Config::for_tests().jwt_secret).unwrap();
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.user_id, body["user"]["id"].as_str().unwrap());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[actix_web::test]
    async fn wrong_password_and_unknown_email_are_invalid_credentials() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({"name": "B", "email": "b@vishakan.com", "password": "right"}))
            .to_request();
        test::call_service(&app, req).await;

        for creds in [
            json!({"email": "b@vishakan.com", "password": "wrong"}),
            json!({"email": "nobody@vishakan.com", "password": "right"}),
        ] {
            let req = test::TestRequest::post().uri("/login").set_json(&creds).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Invalid email or password");
        }
    }

    #[actix_web::test]
    async fn protected_requires_a_valid_token() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::get().uri("/protected").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(crate::test_support::bearer(Role::Employee))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Welcome, user with ID: test-user");
    }

    #[actix_web::test]
    async fn malformed_body_is_a_validation_error() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({"name": "NoEmail"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }
}
