use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, ResponseError};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{ClientName, StatusCheck};
use crate::routes::MAX_LISTED_RECORDS;

#[derive(Debug, serde::Deserialize)]
pub struct CreateStatusCheck {
    pub client_name: String,
}

#[derive(thiserror::Error, Debug)]
pub enum StatusError {
    #[error("{0}")]
    Validation(String),
    #[error("Failed to store the status check")]
    Storage(#[from] sqlx::Error),
}

impl ResponseError for StatusError {
    fn status_code(&self) -> StatusCode {
        match self {
            StatusError::Validation(_) => StatusCode::BAD_REQUEST,
            StatusError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[tracing::instrument(
    name = "Recording a status check",
    skip(form, pool),
    fields(client_name = %form.client_name)
)]
#[post("/status")]
pub async fn create_status_check(
    form: web::Json<CreateStatusCheck>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, StatusError> {
    let client_name = ClientName::parse(form.0.client_name).map_err(StatusError::Validation)?;
    let status_check = StatusCheck {
        id: Uuid::new_v4(),
        client_name: client_name.as_ref().to_string(),
        timestamp: Utc::now(),
    };
    insert_status_check(&pool, &status_check).await?;
    Ok(HttpResponse::Ok().json(status_check))
}

#[tracing::instrument(name = "Listing status checks", skip(pool))]
#[get("/status")]
pub async fn list_status_checks(pool: web::Data<PgPool>) -> Result<HttpResponse, StatusError> {
    let status_checks = fetch_status_checks(&pool).await?;
    Ok(HttpResponse::Ok().json(status_checks))
}

#[tracing::instrument(name = "Saving a status check in the database", skip(pool, status_check))]
pub async fn insert_status_check(
    pool: &PgPool,
    status_check: &StatusCheck,
) -> Result<(), sqlx::Error> {
    sqlx::query(r#"INSERT INTO status_checks (id, client_name, "timestamp") VALUES ($1, $2, $3)"#)
        .bind(status_check.id)
        .bind(&status_check.client_name)
        .bind(status_check.timestamp)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
    Ok(())
}

#[tracing::instrument(name = "Fetching status checks from the database", skip(pool))]
pub async fn fetch_status_checks(pool: &PgPool) -> Result<Vec<StatusCheck>, sqlx::Error> {
    sqlx::query_as::<_, StatusCheck>(
        r#"SELECT id, client_name, "timestamp"
        FROM status_checks
        ORDER BY row_id
        LIMIT $1"#,
    )
    .bind(MAX_LISTED_RECORDS)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        e
    })
}
