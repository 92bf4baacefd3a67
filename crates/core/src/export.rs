//! Data export formats (JSON, CSV, SQL) and the exportable table allow-list.
//!
//! Rows are handled as JSON objects so the same renderers serve every
//! table. CSV output follows RFC 4180 quoting.

use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Sql,
}

impl ExportFormat {
    /// Parse a `format` query value. `None` defaults to JSON.
    pub fn parse(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
            None | Some("") | Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some("sql") => Ok(Self::Sql),
            Some(other) => Err(CoreError::Validation(format!(
                "Unsupported export format '{other}'. Must be one of: json, csv, sql"
            ))),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Sql => "application/sql; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Sql => "sql",
        }
    }
}

// ---------------------------------------------------------------------------
// Table allow-list
// ---------------------------------------------------------------------------

/// Tables that may be dumped by the database export.
///
/// Identity tables (`users`, `password_reset_tokens`) are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportTable {
    Residences,
    Vendeurs,
    Partenaires,
    Acquereurs,
    Lots,
    LotOptions,
    MilestoneSteps,
    Messages,
    Faqs,
    Profiles,
}

impl ExportTable {
    /// Every exportable table, in dependency order.
    pub const ALL: [ExportTable; 10] = [
        Self::Residences,
        Self::Vendeurs,
        Self::Partenaires,
        Self::Acquereurs,
        Self::Lots,
        Self::LotOptions,
        Self::MilestoneSteps,
        Self::Messages,
        Self::Faqs,
        Self::Profiles,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Residences => "residences",
            Self::Vendeurs => "vendeurs",
            Self::Partenaires => "partenaires",
            Self::Acquereurs => "acquereurs",
            Self::Lots => "lots",
            Self::LotOptions => "lot_options",
            Self::MilestoneSteps => "milestone_steps",
            Self::Messages => "messages",
            Self::Faqs => "faqs",
            Self::Profiles => "profiles",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.table_name() == name)
    }
}

/// Parse the `tables` query value: `"all"`, empty, or a comma-separated list.
///
/// Duplicates are removed while keeping first-seen order.
pub fn parse_tables(value: Option<&str>) -> Result<Vec<ExportTable>, CoreError> {
    let raw = value.map(str::trim).unwrap_or("");
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return Ok(ExportTable::ALL.to_vec());
    }

    let mut tables = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let table = ExportTable::from_name(name)
            .ok_or_else(|| CoreError::Validation(format!("Table '{name}' cannot be exported")))?;
        if !tables.contains(&table) {
            tables.push(table);
        }
    }
    Ok(tables)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Quote a CSV field when it contains a comma, quote, CR or LF.
/// Embedded quotes are doubled.
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Join already-stringified fields into one CSV line (no trailing newline).
pub fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| csv_escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a JSON value as a CSV cell. `null` becomes an empty cell; nested
/// values are written as compact JSON.
fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Column order: keys of the first row, then new keys as they appear.
fn collect_columns(rows: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

/// Render JSON object rows as CSV with a header line.
///
/// Returns an empty string for no rows.
pub fn rows_to_csv(rows: &[Value]) -> String {
    let columns = collect_columns(rows);
    if columns.is_empty() {
        return String::new();
    }

    let empty = Map::new();
    let mut out = csv_line(&columns);
    out.push('\n');
    for row in rows {
        let map = row.as_object().unwrap_or(&empty);
        let cells: Vec<String> = columns
            .iter()
            .map(|c| map.get(c).map(value_to_cell).unwrap_or_default())
            .collect();
        out.push_str(&csv_line(&cells));
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// SQL
// ---------------------------------------------------------------------------

fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}

/// Render JSON object rows as `INSERT` statements for `table`.
pub fn rows_to_sql_inserts(table: ExportTable, rows: &[Value]) -> String {
    let columns = collect_columns(rows);
    let mut out = format!("-- {}: {} rows\n", table.table_name(), rows.len());
    if columns.is_empty() {
        return out;
    }

    let column_list = columns.join(", ");
    for row in rows {
        let Some(map) = row.as_object() else {
            continue;
        };
        let values: Vec<String> = columns
            .iter()
            .map(|c| map.get(c).map(sql_literal).unwrap_or_else(|| "NULL".into()))
            .collect();
        out.push_str(&format!(
            "INSERT INTO {} ({column_list}) VALUES ({});\n",
            table.table_name(),
            values.join(", ")
        ));
    }
    out
}
