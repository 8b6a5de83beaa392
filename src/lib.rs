pub mod bootstrap;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod query;
pub mod schema;
pub mod seed;

pub use catalog::{Catalog, Places};
pub use error::QueryError;
