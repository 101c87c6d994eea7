use actix_web::{get, web, Responder};

#[get("/")]
pub async fn health_check() -> impl Responder {
    web::Json(serde_json::json!({ "message": "Contact Intake API" }))
}
