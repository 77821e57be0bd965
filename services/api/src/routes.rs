use crate::infra::AppState;
use crate::report::AuditReport;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use campaign_roaster::audit::report::{write_breakdown_csv, StructureTypeDefinitionView};
use campaign_roaster::audit::AccountAudit;
use campaign_roaster::bulksheet::BulkSheetImporter;
use campaign_roaster::error::AppError;
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct AuditRequest {
    pub(crate) bulk_csv: String,
    #[serde(default)]
    pub(crate) include_campaigns: bool,
}

pub(crate) fn audit_router(max_upload_bytes: usize) -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/audit", post(audit_endpoint))
        .route("/api/v1/audit/breakdown", post(breakdown_endpoint))
        .route("/api/v1/structure-types", get(structure_types_endpoint))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn run_audit(bulk_csv: String) -> Result<AccountAudit, AppError> {
    let table = BulkSheetImporter::from_reader(Cursor::new(bulk_csv.into_bytes()))?;
    Ok(AccountAudit::run(&table))
}

pub(crate) async fn audit_endpoint(
    Json(payload): Json<AuditRequest>,
) -> Result<Json<AuditReport>, AppError> {
    let AuditRequest {
        bulk_csv,
        include_campaigns,
    } = payload;

    let audit = run_audit(bulk_csv)?;
    Ok(Json(AuditReport::from_audit(&audit, include_campaigns)))
}

pub(crate) async fn breakdown_endpoint(
    Json(payload): Json<AuditRequest>,
) -> Result<impl IntoResponse, AppError> {
    let audit = run_audit(payload.bulk_csv)?;

    let mut body = Vec::new();
    write_breakdown_csv(&audit.breakdown(), &mut body)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"campaign_breakdown.csv\"",
            ),
        ],
        body,
    ))
}

pub(crate) async fn structure_types_endpoint() -> Json<Vec<StructureTypeDefinitionView>> {
    Json(StructureTypeDefinitionView::all())
}
