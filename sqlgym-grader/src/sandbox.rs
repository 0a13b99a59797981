use rusqlite::types::Value;
use rusqlite::Connection;
use serde::Serialize;

use crate::errors::{GraderError, Result};

/// A throwaway in-memory database seeded from an exercise's sample schema.
///
/// Every grading run builds its own sandbox, so a submission that mutates
/// data cannot leak into any other run.
#[derive(Debug)]
pub struct Sandbox {
    conn: Connection,
}

impl Sandbox {
    pub fn create(schema_sql: &str, seed_sql: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema_sql)
            .map_err(|e| GraderError::Schema(e.to_string()))?;
        if !seed_sql.trim().is_empty() {
            conn.execute_batch(seed_sql)
                .map_err(|e| GraderError::Seed(e.to_string()))?;
        }
        Ok(Sandbox { conn })
    }

    /// Executes a single statement and collects its output. Statements that
    /// return no rows (INSERT, UPDATE, ...) yield an empty result set.
    pub fn run_query(&self, sql: &str) -> Result<ResultSet> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| GraderError::Query(e.to_string()))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = stmt
            .query([])
            .map_err(|e| GraderError::Query(e.to_string()))?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next().map_err(|e| GraderError::Query(e.to_string()))? {
            let mut cells = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                let value: Value = row
                    .get(idx)
                    .map_err(|e| GraderError::Query(e.to_string()))?;
                cells.push(SqlValue::from(value));
            }
            collected.push(cells);
        }

        Ok(ResultSet {
            columns,
            rows: collected,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<Value> for SqlValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SqlValue::Null,
            Value::Integer(i) => SqlValue::Integer(i),
            Value::Real(f) => SqlValue::Real(f),
            Value::Text(s) => SqlValue::Text(s),
            Value::Blob(b) => SqlValue::Blob(b),
        }
    }
}

impl SqlValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Integer(i) => serde_json::Value::from(*i),
            SqlValue::Real(f) => serde_json::Value::from(*f),
            SqlValue::Text(s) => serde_json::Value::from(s.clone()),
            SqlValue::Blob(b) => {
                serde_json::Value::from(b.iter().map(|x| format!("{:02x}", x)).collect::<String>())
            }
        }
    }
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Real(r) => write!(f, "{}", r),
            SqlValue::Text(s) => write!(f, "{}", s),
            SqlValue::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl ResultSet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Plain-text rendering for feedback prompts, capped at `max_rows`.
    pub fn preview(&self, max_rows: usize) -> String {
        let mut out = self.columns.join(" | ");
        for row in self.rows.iter().take(max_rows) {
            out.push('\n');
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            out.push_str(&cells.join(" | "));
        }
        if self.rows.len() > max_rows {
            out.push_str(&format!("\n... ({} more rows)", self.rows.len() - max_rows));
        }
        out
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TOYS_SCHEMA: &str = "
        CREATE TABLE Toys (
            toyId    INTEGER PRIMARY KEY,
            name     TEXT    NOT NULL,
            category TEXT    NOT NULL,
            price    REAL    NOT NULL
        );";

    pub(crate) const TOYS_SEED: &str = "
        INSERT INTO Toys (toyId, name, category, price) VALUES
            (1, 'Teddy Bear',   'Plush',   19.99),
            (2, 'Race Car',     'Vehicle', 12.50),
            (3, 'Puzzle Cube',  'Puzzle',   7.25),
            (4, 'Toy Train',    'Vehicle', 34.00),
            (5, 'Dollhouse',    'Playset', 89.99),
            (6, 'Kite',         'Outdoor',  9.95),
            (7, 'Yo-Yo',        'Classic',  4.50),
            (8, 'Rubber Duck',  'Bath',     3.25);";

    #[test]
    fn seeded_table_returns_all_rows() {
        let sandbox = Sandbox::create(TOYS_SCHEMA, TOYS_SEED).unwrap();
        let result = sandbox.run_query("SELECT * FROM Toys").unwrap();
        assert_eq!(result.column_count(), 4);
        assert_eq!(result.row_count(), 8);
    }

    #[test]
    fn projection_keeps_column_order() {
        let sandbox = Sandbox::create(TOYS_SCHEMA, TOYS_SEED).unwrap();
        let result = sandbox
            .run_query("SELECT name, price FROM Toys WHERE toyId = 1")
            .unwrap();
        assert_eq!(result.columns, vec!["name", "price"]);
        assert_eq!(
            result.rows[0],
            vec![
                SqlValue::Text("Teddy Bear".to_string()),
                SqlValue::Real(19.99)
            ]
        );
    }

    #[test]
    fn query_error_carries_engine_message() {
        let sandbox = Sandbox::create(TOYS_SCHEMA, TOYS_SEED).unwrap();
        let err = sandbox.run_query("SELECT * FROM Games").unwrap_err();
        match err {
            GraderError::Query(msg) => assert!(msg.contains("no such table")),
            other => panic!("expected query error, got {:?}", other),
        }
    }

    #[test]
    fn bad_schema_is_a_schema_error() {
        let err = Sandbox::create("CREATE TABLE (", "").unwrap_err();
        assert!(matches!(err, GraderError::Schema(_)));
    }

    #[test]
    fn bad_seed_is_a_seed_error() {
        let err = Sandbox::create(TOYS_SCHEMA, "INSERT INTO Missing VALUES (1)").unwrap_err();
        assert!(matches!(err, GraderError::Seed(_)));
    }

    #[test]
    fn empty_seed_is_allowed() {
        let sandbox = Sandbox::create(TOYS_SCHEMA, "  \n").unwrap();
        let result = sandbox.run_query("SELECT * FROM Toys").unwrap();
        assert_eq!(result.row_count(), 0);
    }

    #[test]
    fn mutating_statement_yields_empty_result() {
        let sandbox = Sandbox::create(TOYS_SCHEMA, TOYS_SEED).unwrap();
        let result = sandbox.run_query("DELETE FROM Toys").unwrap();
        assert_eq!(result.column_count(), 0);
        assert_eq!(result.row_count(), 0);
    }

    #[test]
    fn preview_caps_rows() {
        let sandbox = Sandbox::create(TOYS_SCHEMA, TOYS_SEED).unwrap();
        let result = sandbox.run_query("SELECT name FROM Toys").unwrap();
        let preview = result.preview(3);
        assert!(preview.starts_with("name\n"));
        assert!(preview.ends_with("... (5 more rows)"));
    }
}
