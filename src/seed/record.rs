use anyhow::{bail, Context, Result};
use csv::StringRecord;

use crate::schema::{Column, ColumnType, TableSchema};

/// A parsed row ready for insertion, values in schema column order
pub struct SeedRow {
    pub values: Vec<SqlValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

/// Parse a CSV record into a row for the given table schema.
///
/// Fields are matched to columns by header name, so the file's column order
/// does not have to follow the table's declared order.
pub fn parse_record(
    header: &StringRecord,
    record: &StringRecord,
    schema: &TableSchema,
) -> Result<SeedRow> {
    let mut values = Vec::with_capacity(schema.columns.len());

    for col in schema.columns {
        let pos = header
            .iter()
            .position(|h| h.trim() == col.name)
            .with_context(|| {
                format!(
                    "{}: column {:?} missing from header",
                    schema.source_file, col.name
                )
            })?;

        let raw = record.get(pos).unwrap_or("").trim();
        values.push(parse_field(raw, col, schema)?);
    }

    Ok(SeedRow { values })
}

fn parse_field(raw: &str, col: &Column, schema: &TableSchema) -> Result<SqlValue> {
    if raw.is_empty() {
        if !col.nullable {
            bail!("{}: empty value for required column {}", schema.name, col.name);
        }
        return Ok(SqlValue::Null);
    }

    let value = match col.col_type {
        ColumnType::Integer => {
            let n = raw.parse().with_context(|| {
                format!("{}.{}: expected integer, got {:?}", schema.name, col.name, raw)
            })?;
            SqlValue::Integer(n)
        }
        ColumnType::Real => {
            let f = raw.parse().with_context(|| {
                format!("{}.{}: expected number, got {:?}", schema.name, col.name, raw)
            })?;
            SqlValue::Real(f)
        }
        ColumnType::Text => SqlValue::Text(raw.to_string()),
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{CITY, RESTAURANT};

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_city_record() {
        let header = record(&["city_id", "city_name", "country", "continent"]);
        let row = parse_record(&header, &record(&["1", "Paris", "France", "Europe"]), &CITY)
            .unwrap();

        assert_eq!(row.values[0], SqlValue::Integer(1));
        assert_eq!(row.values[1], SqlValue::Text("Paris".into()));
        assert_eq!(row.values[3], SqlValue::Text("Europe".into()));
    }

    #[test]
    fn test_header_order_does_not_matter() {
        let header = record(&["continent", "country", "city_name", "city_id"]);
        let row = parse_record(&header, &record(&["Europe", "France", "Paris", "1"]), &CITY)
            .unwrap();

        // Values still land in schema column order
        assert_eq!(row.values[0], SqlValue::Integer(1));
        assert_eq!(row.values[1], SqlValue::Text("Paris".into()));
    }

    #[test]
    fn test_empty_nullable_field_is_null() {
        let header = record(&["rest_id", "city_id", "name", "avg_price", "description"]);
        let row = parse_record(
            &header,
            &record(&["3", "1", "Chez Janou", "", ""]),
            &RESTAURANT,
        )
        .unwrap();

        assert_eq!(row.values[3], SqlValue::Null);
        assert_eq!(row.values[4], SqlValue::Null);
    }

    #[test]
    fn test_empty_required_field_fails() {
        let header = record(&["city_id", "city_name", "country", "continent"]);
        let result = parse_record(&header, &record(&["1", "", "France", "Europe"]), &CITY);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_header_column_fails() {
        let header = record(&["city_id", "city_name", "country"]);
        let result = parse_record(&header, &record(&["1", "Paris", "France"]), &CITY);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_integer_fails() {
        let header = record(&["city_id", "city_name", "country", "continent"]);
        let result = parse_record(&header, &record(&["one", "Paris", "France", "Europe"]), &CITY);
        assert!(result.is_err());
    }
}
