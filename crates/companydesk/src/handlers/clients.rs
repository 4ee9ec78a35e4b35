//! Client status aggregation.

use axum::{extract::State, Json};

use companydesk_core::api::Envelope;
use companydesk_core::company::{count_client_statuses, ClientStatusCounts};

use crate::{
    handlers::{AppError, OrInternal},
    state::AppState,
};

/// Count active and pending clients (GET /clients/active-pending).
pub async fn active_pending_clients(
    State(state): State<AppState>,
) -> Result<Json<Envelope<ClientStatusCounts>>, AppError> {
    let companies = state
        .company_repo
        .scan_companies()
        .await
        .or_internal("Could not fetch active and pending clients")?;

    let counts = count_client_statuses(&companies);

    tracing::debug!(
        active = counts.active_clients,
        pending = counts.pending_clients,
        "Counted client statuses"
    );

    Ok(Json(Envelope::new(
        "Active and pending clients fetched.",
        counts,
    )))
}
