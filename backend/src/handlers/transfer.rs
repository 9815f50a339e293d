//! Spreadsheet import and export handlers

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use super::PeriodQuery;
use crate::error::{AppError, AppResult};
use crate::services::import::{ImportReport, ImportService};
use crate::services::ReportingService;
use crate::AppState;

/// Import stock movements from an uploaded CSV spreadsheet (field `file`)
pub async fn import_stock(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ImportReport>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadUpload(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadUpload(e.to_string()))?;
            tracing::info!(filename = ?filename, size = bytes.len(), "Received stock spreadsheet");
            upload = Some(bytes);
            break;
        }
    }

    let data = upload.ok_or_else(|| AppError::BadUpload("missing 'file' field".to_string()))?;

    let service = ImportService::new(state.store);
    let report = service.import_stock(&data).await?;
    Ok(Json(report))
}

/// Export the monthly financial report as CSV
pub async fn export_financial(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<impl IntoResponse> {
    let (month, year) = match (query.month, query.year) {
        (Some(month), Some(year)) => (month, year),
        _ => {
            return Err(AppError::Validation {
                field: "mes/ano".to_string(),
                message: "Both month (mes) and year (ano) are required".to_string(),
                message_pt: "Informe o mês (mes) e o ano (ano)".to_string(),
            })
        }
    };
    let period = query.to_period()?;

    let service = ReportingService::new(state.store);
    let csv = service.export_financial(&period).await?;

    let disposition = format!("attachment; filename=\"financial_{}_{:02}.csv\"", year, month);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
