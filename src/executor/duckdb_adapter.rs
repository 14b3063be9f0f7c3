use std::path::Path;

use duckdb::Connection;

use crate::schema::{SchemaRegistry, TableOrigin};

use super::adapter::ExecutorAdapter;
use super::errors::ExecutorError;

/// A single output cell, collapsed from DuckDB's wider value space down to
/// the handful of kinds spec.md §3 `SchemaType` distinguishes. Anything this
/// adapter doesn't have a dedicated variant for (DuckDB's decimal, interval,
/// nested list/struct types, ...) still round-trips through `Text` via its
/// debug rendering rather than being dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<duckdb::types::Value> for CellValue {
    fn from(value: duckdb::types::Value) -> Self {
        use duckdb::types::Value as V;
        match value {
            V::Null => CellValue::Null,
            V::Boolean(b) => CellValue::Bool(b),
            V::TinyInt(i) => CellValue::Int(i as i64),
            V::SmallInt(i) => CellValue::Int(i as i64),
            V::Int(i) => CellValue::Int(i as i64),
            V::BigInt(i) => CellValue::Int(i),
            V::UTinyInt(i) => CellValue::Int(i as i64),
            V::USmallInt(i) => CellValue::Int(i as i64),
            V::UInt(i) => CellValue::Int(i as i64),
            V::Float(f) => CellValue::Float(f as f64),
            V::Double(f) => CellValue::Float(f),
            V::Text(s) => CellValue::Text(s),
            other => CellValue::Text(format!("{other:?}")),
        }
    }
}

/// One stage's materialized query result (spec.md §4.5: "a tabular result
/// that can itself be re-registered"). Rows are fetched eagerly into memory
/// rather than left as a DuckDB-side lazy cursor, the same way the Python
/// original's `duckdb.sql(...)` relation is consumed via `fetch_arrow_table`
/// before the next stage registers it (`original_source/duckcypher/to_sql.py`).
#[derive(Debug, Clone)]
pub struct QueryHandle {
    sql: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl QueryHandle {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Thin wrapper around an in-process DuckDB [`Connection`] implementing
/// [`ExecutorAdapter`] (spec.md §4.5). Grounded on `server::clickhouse_client`'s
/// role as the backend-holding adapter struct, generalized to a synchronous
/// connection since DuckDB is in-process by construction and has no network
/// round trip to await (DESIGN.md).
pub struct DuckDbAdapter {
    conn: Connection,
}

impl DuckDbAdapter {
    pub fn open_in_memory() -> Result<Self, ExecutorError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExecutorError> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Register every table the schema registry knows about against this
    /// connection (spec.md §6 `add_table_from_csv`/`add_table_from_variable`,
    /// §4.5). A CSV table becomes a DuckDB view over `read_csv_auto`, ported
    /// from `original_source/duckcypher/schema.py`'s `add_csv_table`. A
    /// variable table is an external collaborator (spec.md §1: "CSV
    /// ingestion and variable registration" is out of scope) - this only
    /// checks it is already present in the connection's catalog under the
    /// name the registry expects.
    pub fn register_tables(&mut self, registry: &SchemaRegistry) -> Result<(), ExecutorError> {
        for table in registry.show_tables() {
            match &table.origin {
                TableOrigin::Csv(path) => {
                    let ddl = format!(
                        "CREATE OR REPLACE VIEW {} AS SELECT * FROM read_csv_auto('{}')",
                        table.name,
                        path.display()
                    );
                    self.conn.execute_batch(&ddl)?;
                }
                TableOrigin::Variable => {
                    let probe = format!("SELECT 1 FROM {} LIMIT 0", table.name);
                    self.conn
                        .execute_batch(&probe)
                        .map_err(|_| ExecutorError::UnknownTable(table.name.clone()))?;
                }
            }
        }
        Ok(())
    }
}

impl ExecutorAdapter for DuckDbAdapter {
    type Result = QueryHandle;

    fn execute(&mut self, sql: &str) -> Result<QueryHandle, ExecutorError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns = stmt.column_names();
        let column_count = columns.len();

        let mut rows_out = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut out_row = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value: duckdb::types::Value = row.get(i)?;
                out_row.push(CellValue::from(value));
            }
            rows_out.push(out_row);
        }

        Ok(QueryHandle {
            sql: sql.to_string(),
            columns,
            rows: rows_out,
        })
    }

    /// Executes and registers in one DDL statement
    /// (`CREATE TEMP TABLE <name> AS <stage_sql>`), collapsing spec.md
    /// §4.5's "execute, then register" into the single call DuckDB's
    /// `CREATE TABLE AS SELECT` allows - see DESIGN.md and SPEC_FULL.md §4.5.
    fn register_result(&mut self, name: &str, handle: &QueryHandle) -> Result<(), ExecutorError> {
        let ddl = format!("CREATE OR REPLACE TEMP TABLE {name} AS {}", handle.sql);
        self.conn.execute_batch(&ddl)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_returns_columns_and_rows() {
        let mut adapter = DuckDbAdapter::open_in_memory().unwrap();
        let handle = adapter.execute("SELECT 1 AS a, 'x' AS b").unwrap();
        assert_eq!(handle.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(handle.row_count(), 1);
        assert_eq!(handle.rows()[0][0], CellValue::Int(1));
        assert_eq!(handle.rows()[0][1], CellValue::Text("x".to_string()));
    }

    #[test]
    fn test_register_result_makes_table_queryable() {
        let mut adapter = DuckDbAdapter::open_in_memory().unwrap();
        let handle = adapter.execute("SELECT 42 AS n").unwrap();
        adapter.register_result("__stage_a", &handle).unwrap();
        let reread = adapter.execute("SELECT n FROM __stage_a").unwrap();
        assert_eq!(reread.rows()[0][0], CellValue::Int(42));
    }

    #[test]
    fn test_register_tables_creates_csv_view() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("t.csv");
        std::fs::write(&csv_path, "id,name\n1,alice\n2,bob\n").unwrap();

        let mut registry = SchemaRegistry::new();
        registry.add_table_from_csv("t", &csv_path).unwrap();

        let mut adapter = DuckDbAdapter::open_in_memory().unwrap();
        adapter.register_tables(&registry).unwrap();

        let handle = adapter.execute("SELECT COUNT(*) AS n FROM t").unwrap();
        assert_eq!(handle.rows()[0][0], CellValue::Int(2));
    }

    #[test]
    fn test_register_tables_rejects_missing_variable() {
        let mut registry = SchemaRegistry::new();
        registry.add_table_from_variable("ghost").unwrap();

        let mut adapter = DuckDbAdapter::open_in_memory().unwrap();
        assert!(matches!(
            adapter.register_tables(&registry),
            Err(ExecutorError::UnknownTable(_))
        ));
    }
}
