use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    ok: bool,
    service: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        ok: true,
        service: env!("CARGO_PKG_NAME"),
    })
}
