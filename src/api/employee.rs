use crate::{
    error::ApiError,
    model::employee::{ContactDetails, Employee, Position},
    utils::validation::{normalize_email, require_email, require_non_empty},
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

pub const MIN_AGE: i64 = 18;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-014")]
    pub emp_id: String,
    #[schema(example = "Karthik S")]
    pub emp_name: String,
    #[schema(example = "B.E. Civil")]
    pub qualification: String,
    #[schema(example = 29, minimum = 18)]
    pub age: i64,
    #[schema(example = "karthik@vishakan.com", format = "email", value_type = String)]
    pub email: String,
    pub contact_details: ContactDetails,
    pub position: Position,
}

impl CreateEmployee {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&[
            ("emp_id", self.emp_id.as_str()),
            ("emp_name", self.emp_name.as_str()),
            ("qualification", self.qualification.as_str()),
            ("contact_details.primary", self.contact_details.primary.as_str()),
        ])?;

        if self.age < MIN_AGE {
            return Err(ApiError::Validation(format!(
                "age must be at least {}",
                MIN_AGE
            )));
        }

        require_email(self.email.trim())
    }
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
}

async fn fetch_employee(pool: &SqlitePool, id: &str) -> Result<Option<Employee>, ApiError> {
    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, emp_id, emp_name, qualification, age, email,
               contact_primary, contact_emergency, position, created_at
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Employee added successfully",
            "employee": {}
        })),
        (status = 400, description = "Validation failed or duplicate emp_id/email", body = Object, example = json!({
            "message": "age must be at least 18"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let id = Uuid::new_v4().to_string();
    let email = normalize_email(&payload.email);
    let emergency = payload
        .contact_details
        .emergency
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    sqlx::query(
        r#"
        INSERT INTO employees
        (id, emp_id, emp_name, qualification, age, email, contact_primary, contact_emergency, position, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(payload.emp_id.trim())
    .bind(payload.emp_name.trim())
    .bind(payload.qualification.trim())
    .bind(payload.age)
    .bind(&email)
    .bind(payload.contact_details.primary.trim())
    .bind(emergency)
    .bind(payload.position)
    .bind(Utc::now())
    .execute(pool.get_ref())
    .await?;

    let employee = fetch_employee(&pool, &id).await?.ok_or(ApiError::Internal)?;
    info!(employee_id = %employee.id, emp_id = %employee.emp_id, "Employee created");

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee added successfully",
        "employee": employee
    })))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees in insertion order", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, emp_id, emp_name, qualification, age, email,
               contact_primary, contact_emergency, position, created_at
        FROM employees
        ORDER BY rowid
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse { employees }))
}
