//! DuckDB connection wrapper with table registration and row extraction.
//!
//! Input files are copied into in-memory tables on registration, with every
//! column kept as text. Typing happens on the Rust side so a bad value can be
//! reported with its table, row and column.

use crate::error::{KpiError, Result};
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

/// File readers DuckDB can load a table from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Parquet,
    Json,
}

impl FileFormat {
    /// Pick a reader from the file extension. Anything unrecognised is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("parquet") => FileFormat::Parquet,
            Some("json") | Some("ndjson") | Some("jsonl") => FileFormat::Json,
            _ => FileFormat::Csv,
        }
    }

    fn reader_sql(self, path: &str) -> String {
        match self {
            FileFormat::Csv => format!(
                "read_csv('{}', header = true, all_varchar = true)",
                path
            ),
            FileFormat::Parquet => format!("read_parquet('{}')", path),
            FileFormat::Json => format!("read_json_auto('{}')", path),
        }
    }
}

/// Wraps an in-memory DuckDB connection holding the loaded tables.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Open an empty in-memory database.
    pub fn new() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Load a file into a table named `table_name`, replacing any previous table.
    ///
    /// Fails with [`KpiError::InputNotFound`] before touching DuckDB if the
    /// file does not exist.
    pub fn register_table_from_file(&self, table_name: &str, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(KpiError::InputNotFound(path.to_path_buf()));
        }

        let format = FileFormat::from_path(path);
        // Forward slashes for DuckDB, quotes doubled for the SQL literal
        let path_sql = path.to_string_lossy().replace('\\', "/").replace('\'', "''");

        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM {}",
            quote_ident(table_name),
            format.reader_sql(&path_sql)
        ))?;
        tracing::debug!(table = table_name, path = %path.display(), ?format, "registered table");

        Ok(())
    }

    /// Column names of a registered table, in table order.
    pub fn columns(&self, table_name: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name FROM (DESCRIBE SELECT * FROM {})",
            quote_ident(table_name)
        ))?;

        let mut rows = stmt.query([])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            columns.push(name);
        }
        Ok(columns)
    }

    /// Fail with [`KpiError::MissingColumn`] on the first required column the
    /// table does not have.
    pub fn require_columns(&self, table_name: &str, required: &[&str]) -> Result<()> {
        let present = self.columns(table_name)?;
        for column in required {
            if !present.iter().any(|c| c == column) {
                return Err(KpiError::MissingColumn {
                    table: table_name.to_string(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has run
        let column_names: Vec<String> = match rows.as_ref() {
            Some(stmt) => stmt
                .column_names()
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
            None => Vec::new(),
        };

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, name) in column_names.iter().enumerate() {
                map.insert(name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[String]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Read the named columns of a table as text, preserving table row order.
    ///
    /// Every column is cast to VARCHAR so typed sources such as parquet come
    /// back in the same shape as CSV.
    pub fn select_text<T: DeserializeOwned>(&self, table_name: &str, columns: &[&str]) -> Result<Vec<T>> {
        let select: Vec<String> = columns
            .iter()
            .map(|c| format!("CAST({0} AS VARCHAR) AS {0}", quote_ident(c)))
            .collect();
        // rowid keeps the load order stable across runs
        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid",
            select.join(", "),
            quote_ident(table_name)
        );
        self.execute_into(&sql, &[])
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
        // Text-cast selects never produce other types
        _ => serde_json::Value::Null,
    }
}
