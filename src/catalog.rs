//! Read API over a bootstrapped database.
//!
//! A [`Catalog`] holds only the database path and opens one connection per
//! call, so concurrent lookups share nothing beyond the read-only schema.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Params};
use serde::Serialize;

use crate::error::QueryError;
use crate::query::project::{project_row, ProjectedRow};
use crate::query::resolver::{lookup_sql, random_sql};
use crate::query::vocab::{validate, Category, LocationDimension};
use crate::schema::tables::CITY;

/// Distinct values for each location dimension, as served to pickers
#[derive(Debug, Serialize)]
pub struct Places {
    pub cities: Vec<String>,
    pub countries: Vec<String>,
    pub continents: Vec<String>,
}

/// Handle to a bootstrapped database
#[derive(Debug)]
pub struct Catalog {
    db_path: PathBuf,
}

impl Catalog {
    /// Open a catalog, verifying the schema has been bootstrapped. A missing
    /// or half-built database is a `Connection` error, not a panic, so a
    /// rebuild in progress can never be queried.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, QueryError> {
        let catalog = Self {
            db_path: db_path.into(),
        };

        let conn = catalog.connect()?;
        let have_city: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
            [CITY.name],
            |row| row.get(0),
        )?;

        if !have_city {
            return Err(QueryError::Connection(format!(
                "database at {:?} has not been bootstrapped",
                catalog.db_path
            )));
        }

        Ok(catalog)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, QueryError> {
        if !self.db_path.exists() {
            return Err(QueryError::Connection(format!(
                "no database at {:?}",
                self.db_path
            )));
        }

        Connection::open_with_flags(&self.db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| QueryError::Connection(e.to_string()))
    }

    /// Distinct values of one city column, sorted
    pub fn distinct_values(
        &self,
        dimension: LocationDimension,
    ) -> Result<Vec<String>, QueryError> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT DISTINCT {col} FROM city ORDER BY {col}",
            col = dimension.column()
        );

        let mut stmt = conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(values)
    }

    /// All three pickers in one call
    pub fn places(&self) -> Result<Places, QueryError> {
        Ok(Places {
            cities: self.distinct_values(LocationDimension::CityName)?,
            countries: self.distinct_values(LocationDimension::Country)?,
            continents: self.distinct_values(LocationDimension::Continent)?,
        })
    }

    /// Every `category` row in cities matching `value` on `dimension`.
    ///
    /// `dimension` and `category` are validated against the closed
    /// vocabulary before any SQL is assembled; `value` is bound as the
    /// statement's only parameter. No rows is an empty result, not an error.
    pub fn lookup(
        &self,
        dimension: &str,
        category: &str,
        value: &str,
    ) -> Result<Vec<ProjectedRow>, QueryError> {
        let (dim, cat) = validate(dimension, category)?;
        let conn = self.connect()?;
        run_query(&conn, &lookup_sql(dim, cat), [value])
    }

    /// A random subset of one category, at most six rows
    pub fn random_sample(&self, category: &str) -> Result<Vec<ProjectedRow>, QueryError> {
        let cat = Category::parse(category)?;
        let conn = self.connect()?;
        let rows = run_query(&conn, &random_sql(cat), [])?;

        if rows.is_empty() {
            return Err(QueryError::NotFound);
        }

        Ok(rows)
    }
}

fn run_query<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<ProjectedRow>, QueryError> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();

    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(project_row(&columns, row)?);
    }

    Ok(out)
}
