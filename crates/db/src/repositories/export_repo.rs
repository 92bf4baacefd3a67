//! Whole-table dumps for the database export.

use serde_json::Value;
use sqlx::PgPool;
use yam_core::export::ExportTable;

/// Reads tables from the export allow-list as JSON rows.
pub struct ExportRepo;

impl ExportRepo {
    /// Every row of `table` as a JSON object, ordered by `id`.
    ///
    /// The table name comes from [`ExportTable`], never from user input.
    pub async fn dump_table(pool: &PgPool, table: ExportTable) -> Result<Vec<Value>, sqlx::Error> {
        let query = format!(
            "SELECT COALESCE(json_agg(t ORDER BY t.id), '[]'::json) FROM {} t",
            table.table_name()
        );
        let rows: Value = sqlx::query_scalar(&query).fetch_one(pool).await?;
        Ok(match rows {
            Value::Array(rows) => rows,
            _ => Vec::new(),
        })
    }
}
