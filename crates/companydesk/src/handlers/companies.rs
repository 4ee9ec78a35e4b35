//! Company handlers.
//!
//! Each handler makes a single repository call and wraps the result in an
//! `{message, data}` envelope. Failures collapse to the route's fixed error
//! message.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use companydesk_core::api::Envelope;
use companydesk_core::company::{
    paginate, ClientStatusRequest, Company, CompanyId, CompanyPage, PageRequest,
    UpdateExpression, UpsertRequest, CLIENT_STATUS_FIELD,
};
use companydesk_core::serde::deserialize_lenient_i64;

use crate::{
    handlers::{AppError, OrInternal},
    state::AppState,
};

const UPSERT_FAILED: &str = "Could not update or create company info";
const GET_FAILED: &str = "Could not retrieve company";
const NOT_FOUND: &str = "Company not found";
const LIST_FAILED: &str = "Could not retrieve companies";
const STATUS_FAILED: &str = "Could not update client status";

/// Query parameters for listing companies.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCompaniesQuery {
    /// 1-based page number (default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page_number: Option<i64>,
    /// Page size (default: 10)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page_limit: Option<i64>,
}

/// Reads a JSON body. A request without a JSON content type reads as `{}`.
fn json_body(
    body: Result<Json<Value>, JsonRejection>,
    message: &'static str,
) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Map::new())),
        Err(rejection) => Err(AppError::internal(message, rejection)),
    }
}

// ============================================================================
// Upsert Company
// ============================================================================

/// Update or create a company (PUT /companies/{company_id}).
///
/// The target is chosen by the `id` in the body, not the path: a body with an
/// id updates that record, a body without one creates a new record.
pub async fn upsert_company(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body, UPSERT_FAILED)?;

    match UpsertRequest::from_body(body).or_internal(UPSERT_FAILED)? {
        UpsertRequest::Update { id, fields } => {
            let update = UpdateExpression::from_fields(&fields).or_internal(UPSERT_FAILED)?;
            let company = state
                .company_repo
                .update_company(id, &update)
                .await
                .or_internal(UPSERT_FAILED)?;

            tracing::info!(company_id = %id, fields = fields.len(), "Updated company");

            Ok((
                StatusCode::OK,
                Json(Envelope::new("Company info updated successfully.", company)),
            ))
        }
        UpsertRequest::Create { fields } => {
            let company = Company::from_fields(CompanyId::generate(), fields);
            state
                .company_repo
                .put_company(&company)
                .await
                .or_internal(UPSERT_FAILED)?;

            tracing::info!(company_id = %company.id, "Created new company");

            Ok((
                StatusCode::CREATED,
                Json(Envelope::new("New company created successfully.", company)),
            ))
        }
    }
}

// ============================================================================
// Get Company
// ============================================================================

/// Get a single company by ID (GET /companies/{company_id}).
pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<Envelope<Company>>, AppError> {
    let id: CompanyId = company_id.trim().parse().or_internal(GET_FAILED)?;

    let company = state
        .company_repo
        .get_company(id)
        .await
        .or_internal(GET_FAILED)?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    tracing::debug!(company_id = %id, "Retrieved company");

    Ok(Json(Envelope::new(
        "Company details retrieved successfully.",
        company,
    )))
}

// ============================================================================
// List Companies
// ============================================================================

/// List one page of companies (GET /companies?pageNumber&pageLimit).
///
/// Scans the whole table and slices the requested page in memory.
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<Json<Envelope<CompanyPage>>, AppError> {
    let request = PageRequest::from_query(query.page_number, query.page_limit);

    let companies = state
        .company_repo
        .scan_companies()
        .await
        .or_internal(LIST_FAILED)?;

    let page = paginate(companies, request);

    tracing::debug!(
        page = page.page,
        limit = page.limit,
        total = page.total,
        "Listed companies"
    );

    Ok(Json(Envelope::new("Companies retrieved successfully", page)))
}

// ============================================================================
// Update Client Status
// ============================================================================

/// Set a company's client status (PUT /companies/{company_id}/status).
pub async fn update_client_status(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Company>>, AppError> {
    let id: CompanyId = company_id.trim().parse().or_internal(STATUS_FAILED)?;
    let body = json_body(body, STATUS_FAILED)?;
    let request = ClientStatusRequest::from_body(&body).or_internal(STATUS_FAILED)?;

    let update = UpdateExpression::set_field(
        CLIENT_STATUS_FIELD,
        Value::Bool(request.client_status),
    )
    .or_internal(STATUS_FAILED)?;

    let company = state
        .company_repo
        .update_company(id, &update)
        .await
        .or_internal(STATUS_FAILED)?;

    tracing::info!(
        company_id = %id,
        client_status = request.client_status,
        "Updated company client status"
    );

    Ok(Json(Envelope::new("Updated company client status", company)))
}
