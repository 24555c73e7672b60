use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::job::{Job, JobRow, JobStatus},
    utils::validation::require_non_empty,
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
pub struct CreateJob {
    #[schema(example = "Site Engineer")]
    pub title: String,
    #[schema(example = "Coimbatore")]
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub status: JobStatus,
}

#[derive(Serialize, ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
}

fn into_job(row: JobRow) -> Result<Job, ApiError> {
    let id = row.id.clone();
    Job::try_from(row).map_err(|e| {
        error!(job_id = %id, error = %e, "Stored requirements are not a JSON list");
        ApiError::Internal
    })
}

/// Publish a job opening
#[utoipa::path(
    post,
    path = "/api/admin/jobs",
    request_body = CreateJob,
    responses(
        (status = 201, description = "Job created", body = Object, example = json!({
            "message": "Job created successfully",
            "job": {}
        })),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Employees cannot publish jobs")
    ),
    tag = "Job",
    security(("bearer_auth" = []))
)]
pub async fn create_job(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateJob>,
) -> Result<HttpResponse, ApiError> {
    auth.require_manager_or_admin()?;

    require_non_empty(&[
        ("title", payload.title.as_str()),
        ("location", payload.location.as_str()),
        ("description", payload.description.as_str()),
    ])?;

    let requirements: Vec<String> = payload
        .requirements
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    let requirements_json = serde_json::to_string(&requirements).map_err(|e| {
        error!(error = %e, "Failed to encode requirements");
        ApiError::Internal
    })?;

    let job = Job {
        id: Uuid::new_v4().to_string(),
        title: payload.title.trim().to_string(),
        location: payload.location.trim().to_string(),
        description: payload.description.trim().to_string(),
        requirements,
        status: payload.status,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO jobs (id, title, location, description, requirements, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&job.id)
    .bind(&job.title)
    .bind(&job.location)
    .bind(&job.description)
    .bind(requirements_json)
    .bind(job.status)
    .bind(job.created_at)
    .execute(pool.get_ref())
    .await?;

    info!(job_id = %job.id, created_by = %auth.user_id, "Job created");

    Ok(HttpResponse::Created().json(json!({
        "message": "Job created successfully",
        "job": job
    })))
}

/// List job openings, newest first
#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    responses(
        (status = 200, description = "All jobs", body = JobListResponse),
        (status = 401, description = "Missing token")
    ),
    tag = "Job",
    security(("bearer_auth" = []))
)]
pub async fn list_jobs(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, title, location, description, requirements, status, created_at
        FROM jobs
        ORDER BY rowid DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    let jobs = rows.into_iter().map(into_job).collect::<Result<Vec<_>, _>>()?;

    Ok(HttpResponse::Ok().json(JobListResponse { jobs }))
}

#[cfg(test)]
mod tests {
    use crate::db::test_pool;
    use crate::model::role::Role;
    use crate::notify::testing::RecordingMailer;
    use crate::test_support::{bearer, test_app};
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn opening() -> Value {
        json!({
            "title": "Site Engineer",
            "location": "Coimbatore",
            "description": "Supervise RCC works",
            "requirements": ["B.E. Civil", "  ", "2+ years site experience"]
        })
    }

    #[actix_web::test]
    async fn jobs_need_a_token() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::get().uri("/api/admin/jobs").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn employees_cannot_publish() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/api/admin/jobs")
            .insert_header(bearer(Role::Employee))
            .set_json(opening())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn manager_publishes_and_lists() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/api/admin/jobs")
            .insert_header(bearer(Role::Manager))
            .set_json(opening())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/admin/jobs")
            .insert_header(bearer(Role::Employee))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let job = &body["jobs"][0];
        assert_eq!(job["status"], "active");
        assert_eq!(job["requirements"], json!(["B.E. Civil", "2+ years site experience"]));
    }
}
