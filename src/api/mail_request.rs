use crate::{
    error::ApiError,
    model::mail_request::MailRequest,
    utils::validation::{normalize_email, require_email, require_non_empty},
};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct SubmitMailRequest {
    #[schema(example = "Arun")]
    pub name: String,
    #[schema(example = "arun@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[schema(example = "Looking for a quote on a duplex house")]
    pub message: String,
    /// Defaults to the time of submission
    #[schema(format = "date-time", value_type = Option<String>)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailRequestListResponse {
    pub mail_requests: Vec<MailRequest>,
}

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/mailrequest",
    request_body = SubmitMailRequest,
    responses(
        (status = 201, description = "Message stored", body = Object, example = json!({
            "message": "Message submitted successfully!",
            "mailRequest": {}
        })),
        (status = 400, description = "Missing field or malformed email")
    ),
    tag = "MailRequest"
)]
pub async fn submit_mail_request(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SubmitMailRequest>,
) -> Result<HttpResponse, ApiError> {
    require_non_empty(&[
        ("name", payload.name.as_str()),
        ("email", payload.email.as_str()),
        ("message", payload.message.as_str()),
    ])?;
    let email = normalize_email(&payload.email);
    require_email(&email)?;

    let mail_request = MailRequest {
        id: Uuid::new_v4().to_string(),
        name: payload.name.trim().to_string(),
        email,
        phone: payload.phone.trim().to_string(),
        message: payload.message.trim().to_string(),
        date: payload.date.unwrap_or_else(Utc::now),
    };

    sqlx::query(
        "INSERT INTO mail_requests (id, name, email, phone, message, date) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&mail_request.id)
    .bind(&mail_request.name)
    .bind(&mail_request.email)
    .bind(&mail_request.phone)
    .bind(&mail_request.message)
    .bind(mail_request.date)
    .execute(pool.get_ref())
    .await?;

    info!(mail_request_id = %mail_request.id, "Mail request submitted");

    Ok(HttpResponse::Created().json(json!({
        "message": "Message submitted successfully!",
        "mailRequest": mail_request
    })))
}

/// List contact-form messages
#[utoipa::path(
    get,
    path = "/api/mailrequest",
    responses(
        (status = 200, description = "All messages in arrival order", body = MailRequestListResponse)
    ),
    tag = "MailRequest"
)]
pub async fn list_mail_requests(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let mail_requests = sqlx::query_as::<_, MailRequest>(
        "SELECT id, name, email, phone, message, date FROM mail_requests ORDER BY rowid",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(MailRequestListResponse { mail_requests }))
}

/// Delete a contact-form message
#[utoipa::path(
    delete,
    path = "/api/mailrequest/{id}",
    params(
        ("id", Path, description = "Mail request ID")
    ),
    responses(
        (status = 200, description = "Deleted", body = Object, example = json!({
            "message": "Mail request deleted"
        })),
        (status = 404, description = "Mail request not found")
    ),
    tag = "MailRequest"
)]
pub async fn delete_mail_request(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM mail_requests WHERE id = ?")
        .bind(&id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Mail request not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Mail request deleted"
    })))
}

#[cfg(test)]
mod tests {
    use crate::db::test_pool;
    use crate::notify::testing::RecordingMailer;
    use crate::test_support::test_app;
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn date_defaults_to_now_and_explicit_date_is_kept() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/api/mailrequest")
            .set_json(json!({"name": "Arun", "email": "arun@example.com", "phone": "1", "message": "Quote please"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["mailRequest"]["date"].as_str().unwrap().starts_with("20"));

        let req = test::TestRequest::post()
            .uri("/api/mailrequest")
            .set_json(json!({
                "name": "Bala", "email": "bala@example.com", "message": "Site visit",
                "date": "2025-12-31T09:30:00Z"
            }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/mailrequest").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let list = body["mailRequests"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "Arun");
        assert_eq!(list[1]["date"], "2025-12-31T09:30:00Z");
    }

    #[actix_web::test]
    async fn empty_message_is_rejected() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/api/mailrequest")
            .set_json(json!({"name": "Arun", "email": "arun@example.com", "message": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "message is required");
    }

    #[actix_web::test]
    async fn delete_removes_once() {
        let pool = test_pool().await;
        let app = test_app!(pool, Arc::new(RecordingMailer::default()));

        let req = test::TestRequest::post()
            .uri("/api/mailrequest")
            .set_json(json!({"name": "Arun", "email": "arun@example.com", "message": "Hi"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["mailRequest"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/mailrequest/{}", id);
        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
