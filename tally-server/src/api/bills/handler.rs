//! Bill API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::billing::BillingService;
use crate::core::ServerState;
use crate::db::models::{BillGenerate, BillResolved};
use crate::db::repository::BillRepository;
use crate::printing::ReceiptRenderer;
use crate::utils::time::now_millis;
use crate::utils::{ApiResponse, AppError, AppResult, created, ok, ok_with_results};

#[derive(Debug, Serialize)]
pub struct BillWithDocument {
    pub bill: BillResolved,
    /// Rendered receipt, base64-encoded
    pub document: String,
}

#[derive(Debug, Serialize)]
pub struct BillsData {
    pub bills: Vec<BillResolved>,
}

#[derive(Debug, Serialize)]
pub struct BillData {
    pub bill: BillResolved,
}

#[derive(Debug, Serialize)]
pub struct DocumentData {
    /// Rendered receipt, base64-encoded
    pub document: String,
}

/// POST /api/bills/generate - generate a bill and its receipt
pub async fn generate(
    State(state): State<ServerState>,
    Json(payload): Json<BillGenerate>,
) -> AppResult<(StatusCode, Json<ApiResponse<BillWithDocument>>)> {
    let service = BillingService::new(state.db.clone());
    let bill = service.generate_bill(payload).await?;

    let document = ReceiptRenderer::default().render(&bill, now_millis());

    Ok(created(BillWithDocument {
        bill,
        document: BASE64.encode(document),
    }))
}

/// GET /api/bills - list all bills, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<BillsData>>> {
    let repo = BillRepository::new(state.db.clone());
    let bills = repo.find_all_resolved().await.map_err(AppError::from)?;

    let results = bills.len();
    Ok(ok_with_results(BillsData { bills }, results))
}

/// GET /api/bills/{id} - fetch a single bill
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BillData>>> {
    let repo = BillRepository::new(state.db.clone());
    let bill = repo
        .find_by_id_resolved(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Bill"))?;

    Ok(ok(BillData { bill }))
}

/// GET /api/bills/{id}/pdf - render the receipt for an existing bill
///
/// The embedded "printed" timestamp is the render call time, not the
/// bill's creation time.
pub async fn render_document(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DocumentData>>> {
    let repo = BillRepository::new(state.db.clone());
    let bill = repo
        .find_by_id_resolved(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Bill"))?;

    let document = ReceiptRenderer::default().render(&bill, now_millis());

    Ok(ok(DocumentData {
        document: BASE64.encode(document),
    }))
}
