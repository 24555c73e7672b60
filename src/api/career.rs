use crate::{
    error::ApiError,
    model::career::{ApplicationStatus, CareerApplication},
    notify::{self, Mailer},
    utils::{
        pagination::{Page, PageQuery},
        validation::{normalize_email, require_email, require_non_empty},
    },
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplication {
    #[schema(example = "Priya R")]
    pub name: String,
    #[schema(example = "priya@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    #[schema(example = "2022")]
    pub graduation_year: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub resume_link: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DecisionRequest {
    /// Application id
    pub id: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPage {
    pub success: bool,
    pub applications: Vec<CareerApplication>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

const SELECT_APPLICATION: &str = r#"
    SELECT id, name, email, phone, gender, graduation_year, experience, resume_link, status, created_at
    FROM career_applications
"#;

/// Submit a job application
#[utoipa::path(
    post,
    path = "/api/careers",
    request_body = SubmitApplication,
    responses(
        (status = 201, description = "Application stored as pending", body = Object, example = json!({
            "success": true,
            "message": "Application submitted",
            "application": {}
        })),
        (status = 400, description = "Missing name or malformed email")
    ),
    tag = "Career"
)]
pub async fn submit_application(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SubmitApplication>,
) -> Result<HttpResponse, ApiError> {
    require_non_empty(&[("name", payload.name.as_str()), ("email", payload.email.as_str())])?;
    let email = normalize_email(&payload.email);
    require_email(&email)?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO career_applications
        (id, name, email, phone, gender, graduation_year, experience, resume_link, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(payload.name.trim())
    .bind(&email)
    .bind(payload.phone.trim())
    .bind(payload.gender.trim())
    .bind(payload.graduation_year.trim())
    .bind(payload.experience.trim())
    .bind(payload.resume_link.trim())
    .bind(ApplicationStatus::Pending)
    .bind(Utc::now())
    .execute(pool.get_ref())
    .await?;

    let application = fetch_application(&pool, &id).await?.ok_or(ApiError::Internal)?;
    info!(application_id = %id, "Career application submitted");

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Application submitted",
        "application": application
    })))
}

/// List applications, newest first
#[utoipa::path(
    get,
    path = "/api/careers",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of applications", body = ApplicationPage)
    ),
    tag = "Career"
)]
pub async fn list_applications(
    pool: web::Data<SqlitePool>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = Page::from_query(&query);

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM career_applications")
        .fetch_one(pool.get_ref())
        .await?;

    let applications = sqlx::query_as::<_, CareerApplication>(&format!(
        "{} ORDER BY rowid DESC LIMIT ? OFFSET ?",
        SELECT_APPLICATION
    ))
    .bind(page.limit as i64)
    .bind(page.offset())
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(ApplicationPage {
        success: true,
        applications,
        page: page.page,
        limit: page.limit,
        total,
        total_pages: page.total_pages(total),
    }))
}

async fn fetch_application(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<CareerApplication>, ApiError> {
    let application = sqlx::query_as::<_, CareerApplication>(&format!("{} WHERE id = ?", SELECT_APPLICATION))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(application)
}

/// Record the decision, then notify the applicant.
///
/// The status write and the email are independent: if delivery fails the
/// new status stays and the caller gets a 500 naming the stored status.
async fn decide(
    pool: &SqlitePool,
    mailer: &dyn Mailer,
    id: &str,
    status: ApplicationStatus,
) -> Result<HttpResponse, ApiError> {
    let application = fetch_application(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    sqlx::query("UPDATE career_applications SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    let sent = match status {
        ApplicationStatus::Denied => {
            notify::send_denial_email(mailer, &application.name, &application.email).await
        }
        _ => notify::send_approval_email(mailer, &application.name, &application.email).await,
    };

    match sent {
        Ok(()) => {
            info!(application_id = %id, %status, "Decision recorded and email sent");
            let message = match status {
                ApplicationStatus::Denied => "Denial email sent",
                _ => "Approval email sent with appointment",
            };
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": message,
                "status": status
            })))
        }
        Err(e) => {
            error!(application_id = %id, %status, error = %e, "Decision recorded but email failed");
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": ApiError::Delivery(e.to_string()).to_string(),
                "status": status
            })))
        }
    }
}

/// Approve an application and email an interview date
#[utoipa::path(
    post,
    path = "/api/career/approve",
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Status set and email sent", body = Object, example = json!({
            "success": true,
            "message": "Approval email sent with appointment",
            "status": "approved"
        })),
        (status = 404, description = "Application not found"),
        (status = 500, description = "Status set but email delivery failed", body = Object, example = json!({
            "success": false,
            "message": "Failed to send email: connection refused",
            "status": "approved"
        }))
    ),
    tag = "Career"
)]
pub async fn approve(
    pool: web::Data<SqlitePool>,
    mailer: web::Data<dyn Mailer>,
    payload: web::Json<DecisionRequest>,
) -> Result<HttpResponse, ApiError> {
    decide(&pool, mailer.get_ref(), &payload.id, ApplicationStatus::Approved).await
}

/// Deny an application and email the applicant
#[utoipa::path(
    post,
    path = "/api/career/deny",
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Status set and email sent"),
        (status = 404, description = "Application not found"),
        (status = 500, description = "Status set but email delivery failed")
    ),
    tag = "Career"
)]
pub async fn deny(
    pool: web::Data<SqlitePool>,
    mailer: web::Data<dyn Mailer>,
    payload: web::Json<DecisionRequest>,
) -> Result<HttpResponse, ApiError> {
    decide(&pool, mailer.get_ref(), &payload.id, ApplicationStatus::Denied).await
}
