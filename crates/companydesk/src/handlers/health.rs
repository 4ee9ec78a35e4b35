//! Liveness endpoint.

use axum::Json;

use companydesk_core::api::Envelope;

/// GET /test - Basic liveness check.
///
/// Returns 200 immediately without touching storage.
#[axum::debug_handler]
pub async fn test() -> Json<Envelope<()>> {
    Json(Envelope::message("Serverless function running successfully"))
}
