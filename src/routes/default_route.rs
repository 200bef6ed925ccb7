use actix_web::{get, HttpResponse};

#[get("/")]
async fn status() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "Outreach automation API is running!"
    }))
}
