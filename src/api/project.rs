use crate::{
    error::ApiError,
    model::project::{Project, ProjectStatus},
    utils::validation::require_non_empty,
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateProject {
    #[schema(example = "Anna Nagar Residency")]
    pub title: String,
    #[schema(example = "G+4 residential block")]
    pub description: String,
    pub status: ProjectStatus,
    #[schema(example = 0)]
    pub employees: i64,
    #[schema(example = "Chennai")]
    pub location: String,
    /// Estimated duration in days
    #[schema(example = 180.0)]
    pub estimation: f64,
}

/// Only the supplied fields change.
#[derive(Deserialize, ToSchema)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub employees: Option<i64>,
    pub location: Option<String>,
    pub estimation: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
pub struct AssignEmployees {
    #[serde(rename = "assignedEmployeeIds", alias = "employeeIds")]
    #[schema(example = json!(["0b8f3a8e-2f4e-4d7b-9a0c-3f4b6a1d2e11"]))]
    pub employee_ids: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

fn validate_numbers(employees: Option<i64>, estimation: Option<f64>) -> Result<(), ApiError> {
    if employees.is_some_and(|n| n < 0) {
        return Err(ApiError::Validation("employees cannot be negative".to_string()));
    }
    if estimation.is_some_and(|e| !e.is_finite() || e < 0.0) {
        return Err(ApiError::Validation(
            "estimation must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

impl CreateProject {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&[
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("location", self.location.as_str()),
        ])?;
        validate_numbers(Some(self.employees), Some(self.estimation))
    }
}

impl UpdateProject {
    fn validate(&self) -> Result<(), ApiError> {
        let supplied: Vec<(&str, &str)> = [
            ("title", self.title.as_deref()),
            ("description", self.description.as_deref()),
            ("location", self.location.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();

        require_non_empty(&supplied)?;
        validate_numbers(self.employees, self.estimation)
    }
}

async fn assigned_ids(pool: &SqlitePool, project_id: &str) -> Result<Vec<String>, ApiError> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT employee_id FROM project_assignments WHERE project_id = ? ORDER BY rowid",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

async fn fetch_project(pool: &SqlitePool, id: &str) -> Result<Option<Project>, ApiError> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, title, description, status, employees, location, estimation, created_at
        FROM projects
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match project {
        Some(mut project) => {
            project.assigned_employee_ids = assigned_ids(pool, &project.id).await?;
            Ok(Some(project))
        }
        None => Ok(None),
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("Project not found".to_string())
}

/// Union `employee_ids` into the project's assigned set and recompute the
/// cached `employees` count from the stored set.
///
/// Each statement is atomic on its own; two concurrent calls for the same
/// project can interleave, and the count reflects whichever recount ran last.
pub async fn assign(
    pool: &SqlitePool,
    project_id: &str,
    employee_ids: &[String],
) -> Result<Project, ApiError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?)")
            .bind(project_id)
            .fetch_one(pool)
            .await?;
    if !exists {
        return Err(not_found());
    }

    for employee_id in employee_ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        sqlx::query(
            "INSERT OR IGNORE INTO project_assignments (project_id, employee_id) VALUES (?, ?)",
        )
        .bind(project_id)
        .bind(employee_id)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        r#"
        UPDATE projects
        SET employees = (SELECT COUNT(*) FROM project_assignments WHERE project_id = ?1)
        WHERE id = ?1
        "#,
    )
    .bind(project_id)
    .execute(pool)
    .await?;

    fetch_project(pool, project_id).await?.ok_or_else(not_found)
}

/// Create Project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created", body = Object, example = json!({
            "message": "Project added successfully",
            "project": {}
        })),
        (status = 400, description = "Missing or invalid field")
    ),
    tag = "Project"
)]
pub async fn create_project(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateProject>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO projects
        (id, title, description, status, employees, location, estimation, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(payload.title.trim())
    .bind(payload.description.trim())
    .bind(payload.status)
    .bind(payload.employees)
    .bind(payload.location.trim())
    .bind(payload.estimation)
    .bind(Utc::now())
    .execute(pool.get_ref())
    .await?;

    let project = fetch_project(&pool, &id).await?.ok_or(ApiError::Internal)?;
    info!(project_id = %project.id, "Project created");

    Ok(HttpResponse::Created().json(json!({
        "message": "Project added successfully",
        "project": project
    })))
}

/// List Projects
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "All projects with their assigned employee ids", body = ProjectListResponse)
    ),
    tag = "Project"
)]
pub async fn list_projects(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let mut projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, title, description, status, employees, location, estimation, created_at
        FROM projects
        ORDER BY rowid
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    for project in projects.iter_mut() {
        project.assigned_employee_ids = assigned_ids(&pool, &project.id).await?;
    }

    Ok(HttpResponse::Ok().json(ProjectListResponse { projects }))
}

/// Update Project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id", Path, description = "Project ID")
    ),
    request_body = UpdateProject,
    responses(
        (status = 200, description = "Project updated", body = Object, example = json!({
            "message": "Project updated successfully",
            "project": {}
        })),
        (status = 404, description = "Project not found", body = Object, example = json!({
            "message": "Project not found"
        }))
    ),
    tag = "Project"
)]
pub async fn update_project(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<UpdateProject>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();
    payload.validate()?;

    // once staff are assigned the count follows the assigned set
    let result = sqlx::query(
        r#"
        UPDATE projects SET
            title = COALESCE(?1, title),
            description = COALESCE(?2, description),
            status = COALESCE(?3, status),
            employees = CASE
                WHEN EXISTS(SELECT 1 FROM project_assignments WHERE project_id = ?7)
                THEN (SELECT COUNT(*) FROM project_assignments WHERE project_id = ?7)
                ELSE COALESCE(?4, employees)
            END,
            location = COALESCE(?5, location),
            estimation = COALESCE(?6, estimation)
        WHERE id = ?7
        "#,
    )
    .bind(payload.title.as_deref().map(str::trim))
    .bind(payload.description.as_deref().map(str::trim))
    .bind(payload.status)
    .bind(payload.employees)
    .bind(payload.location.as_deref().map(str::trim))
    .bind(payload.estimation)
    .bind(&project_id)
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        debug!(%project_id, "Update on missing project");
        return Err(not_found());
    }

    let project = fetch_project(&pool, &project_id).await?.ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Project updated successfully",
        "project": project
    })))
}

/// Delete Project
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id", Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted", body = Object, example = json!({
            "message": "Project deleted successfully"
        })),
        (status = 404, description = "Project not found")
    ),
    tag = "Project"
)]
pub async fn delete_project(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();

    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(&project_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        debug!(%project_id, "Delete on missing project");
        return Err(not_found());
    }

    // the assignment set belongs to the project; employees themselves stay
    sqlx::query("DELETE FROM project_assignments WHERE project_id = ?")
        .bind(&project_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(%project_id, "Project deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Project deleted successfully"
    })))
}

/// Assign employees to a project
///
/// Adds to the existing assignment; ids already present are ignored and
/// nothing is ever unassigned.
#[utoipa::path(
    put,
    path = "/api/projects/{id}/assign",
    params(
        ("id", Path, description = "Project ID")
    ),
    request_body = AssignEmployees,
    responses(
        (status = 200, description = "Employees assigned", body = Object, example = json!({
            "message": "Employees assigned successfully",
            "project": {}
        })),
        (status = 404, description = "Project not found")
    ),
    tag = "Project"
)]
pub async fn assign_employees(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<AssignEmployees>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();

    let project = assign(&pool, &project_id, &payload.employee_ids).await?;
    info!(%project_id, employees = project.employees, "Employees assigned");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employees assigned successfully",
        "project": project
    })))
}
