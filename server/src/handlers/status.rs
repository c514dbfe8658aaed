use actix_web::{HttpResponse, Responder};
use system::serde_json::json;

pub async fn status() -> impl Responder {
    let version = env!("CARGO_PKG_VERSION");

    HttpResponse::Ok().json(json!({
        "data": {
            "version": version,
        },
        "message": "Service is running..."
    }))
}
