pub mod project;
pub mod resolver;
pub mod vocab;

pub use project::ProjectedRow;
pub use vocab::{validate, Category, JoinShape, LocationDimension};
