//! Lot and database exports.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use yam_core::error::CoreError;
use yam_core::export::{
    csv_line, parse_tables, rows_to_csv, rows_to_sql_inserts, ExportFormat,
};
use yam_core::lot::validate_lot_status;
use yam_core::types::{DbId, Timestamp};
use yam_db::models::lot::{LotExportRow, LotFilter};
use yam_db::repositories::{ExportRepo, LotRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::SuccessResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportLotsParams {
    pub format: Option<String>,
    pub statut: Option<String>,
    pub residence_id: Option<DbId>,
    pub partenaire_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct ExportDatabaseParams {
    pub format: Option<String>,
    pub tables: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LotExport {
    pub count: usize,
    pub data: Vec<LotExportRow>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseExport {
    pub exported_at: Timestamp,
    /// Rows per table name.
    pub tables: Map<String, Value>,
}

fn attachment(format: ExportFormat, stem: &str, body: String) -> Response {
    let filename = format!(
        "{stem}-{}.{}",
        Utc::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    );
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Render lot rows as CSV with a header line, one line per lot.
pub fn lots_to_csv(rows: &[LotExportRow]) -> String {
    let mut out = csv_line(&LotExportRow::CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&csv_line(&row.csv_fields()));
        out.push('\n');
    }
    out
}

/// GET /functions/export-lots?format=json|csv&statut=&residence_id=&partenaire_id=
///
/// Staff export any lot; a partner only the lots they hold.
pub async fn export_lots(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ExportLotsParams>,
) -> AppResult<Response> {
    let format = ExportFormat::parse(params.format.as_deref())?;
    if format == ExportFormat::Sql {
        return Err(AppError::Core(CoreError::Validation(
            "Lots can be exported as json or csv".into(),
        )));
    }
    if let Some(statut) = params.statut.as_deref() {
        validate_lot_status(statut)?;
    }

    let partenaire_id = if auth.is_staff() {
        params.partenaire_id
    } else {
        Some(
            auth.partenaire_id
                .ok_or_else(|| AppError::forbidden("Only staff and partners may export lots"))?,
        )
    };
    let filter = LotFilter {
        statut: params.statut,
        residence_id: params.residence_id,
        partenaire_id,
    };

    let rows = LotRepo::export_rows(&state.pool, &filter).await?;
    tracing::info!(user_id = auth.user_id, count = rows.len(), ?format, "Lots exported");

    match format {
        ExportFormat::Csv => Ok(attachment(format, "lots", lots_to_csv(&rows))),
        _ => Ok(Json(SuccessResponse::new(LotExport {
            count: rows.len(),
            data: rows,
        }))
        .into_response()),
    }
}

/// GET|POST /functions/export-database?format=json|csv|sql&tables=all|a,b
///
/// CSV output holds one section per table, each introduced by a `# table`
/// line and followed by a blank line.
pub async fn export_database(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ExportDatabaseParams>,
) -> AppResult<Response> {
    let format = ExportFormat::parse(params.format.as_deref())?;
    let tables = parse_tables(params.tables.as_deref())?;

    let mut dumps = Vec::with_capacity(tables.len());
    for table in tables {
        let rows = ExportRepo::dump_table(&state.pool, table).await?;
        dumps.push((table, rows));
    }
    tracing::info!(
        user_id = admin.user_id,
        tables = dumps.len(),
        ?format,
        "Database exported"
    );

    let response = match format {
        ExportFormat::Json => {
            let tables = dumps
                .into_iter()
                .map(|(t, rows)| (t.table_name().to_string(), Value::Array(rows)))
                .collect();
            Json(SuccessResponse::new(DatabaseExport {
                exported_at: Utc::now(),
                tables,
            }))
            .into_response()
        }
        ExportFormat::Csv => {
            let mut body = String::new();
            for (table, rows) in &dumps {
                body.push_str(&format!("# {}\n", table.table_name()));
                body.push_str(&rows_to_csv(rows));
                body.push('\n');
            }
            attachment(format, "database", body)
        }
        ExportFormat::Sql => {
            let mut body = format!("-- YAM Management export {}\n", Utc::now().to_rfc3339());
            for (table, rows) in &dumps {
                body.push_str(&rows_to_sql_inserts(*table, rows));
            }
            attachment(format, "database", body)
        }
    };
    Ok(response)
}
