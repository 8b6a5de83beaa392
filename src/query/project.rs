//! Turns executor rows into ordered column-name/value mappings.

use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde_json::{Map, Number, Value};

/// One projected result row: column name to value, in executor column order
pub type ProjectedRow = Map<String, Value>;

/// Zip column names with one row's values positionally. Duplicate column
/// names across joined tables collapse last-wins, keeping the first
/// occurrence's position.
pub fn project_row(columns: &[String], row: &Row) -> rusqlite::Result<ProjectedRow> {
    let mut out = Map::new();

    for (idx, name) in columns.iter().enumerate() {
        out.insert(name.clone(), json_value(row.get_ref(idx)?));
    }

    Ok(out)
}

/// Map a SQLite value to JSON without further coercion
fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::from(String::from_utf8_lossy(t).into_owned()),
        // The schema declares no blob columns
        ValueRef::Blob(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn collect(conn: &Connection, sql: &str) -> Vec<ProjectedRow> {
        let mut stmt = conn.prepare(sql).unwrap();
        let columns: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
        let mut rows = stmt.query([]).unwrap();
        let mut out = Vec::new();
        while let Some(row) = rows.next().unwrap() {
            out.push(project_row(&columns, row).unwrap());
        }
        out
    }

    #[test]
    fn test_preserves_declared_column_order() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (zulu INTEGER, alpha TEXT, mike REAL);
             INSERT INTO t VALUES (1, 'x', 2.5);",
        )
        .unwrap();

        let rows = collect(&conn, "SELECT * FROM t");
        assert_eq!(rows.len(), 1);
        let keys: Vec<_> = rows[0].keys().cloned().collect();
        assert_eq!(keys, ["zulu", "alpha", "mike"]);
        assert_eq!(rows[0]["zulu"], Value::from(1));
        assert_eq!(rows[0]["mike"], Value::from(2.5));
    }

    #[test]
    fn test_zero_rows_is_empty_not_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (a INTEGER);").unwrap();

        let rows = collect(&conn, "SELECT * FROM t");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_null_passes_through() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (a INTEGER, b TEXT);
             INSERT INTO t VALUES (NULL, NULL);",
        )
        .unwrap();

        let rows = collect(&conn, "SELECT * FROM t");
        assert_eq!(rows[0]["a"], Value::Null);
        assert_eq!(rows[0]["b"], Value::Null);
    }
}
