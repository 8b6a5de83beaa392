//! The closed vocabulary of lookup inputs.
//!
//! Every caller-supplied dimension or category string must pass through
//! [`validate`] (or the enums' `parse`) before it can influence query
//! construction. SQL identifiers are only ever taken from the enums below,
//! never from the raw request.

use crate::error::QueryError;

/// City attribute usable as a lookup filter key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationDimension {
    CityName,
    Country,
    Continent,
}

impl LocationDimension {
    pub const ALL: [LocationDimension; 3] = [
        LocationDimension::CityName,
        LocationDimension::Country,
        LocationDimension::Continent,
    ];

    /// Column name on the `city` table
    pub fn column(self) -> &'static str {
        match self {
            LocationDimension::CityName => "city_name",
            LocationDimension::Country => "country",
            LocationDimension::Continent => "continent",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        match raw {
            "city_name" => Ok(LocationDimension::CityName),
            "country" => Ok(LocationDimension::Country),
            "continent" => Ok(LocationDimension::Continent),
            _ => Err(QueryError::UnknownDimension(raw.to_string())),
        }
    }
}

/// Point-of-interest entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Museum,
    Park,
    Sight,
    Restaurant,
    Food,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Museum,
        Category::Park,
        Category::Sight,
        Category::Restaurant,
        Category::Food,
    ];

    /// The category's own table
    pub fn table(self) -> &'static str {
        match self {
            Category::Museum => "museum",
            Category::Park => "park",
            Category::Sight => "sight",
            Category::Restaurant => "restaurant",
            Category::Food => "food",
        }
    }

    /// How this category's lookup reaches the `city` table
    pub fn join_shape(self) -> JoinShape {
        match self {
            Category::Food => JoinShape::ViaRestaurant,
            _ => JoinShape::Direct,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        match raw {
            "museum" => Ok(Category::Museum),
            "park" => Ok(Category::Park),
            "sight" => Ok(Category::Sight),
            "restaurant" => Ok(Category::Restaurant),
            "food" => Ok(Category::Food),
            _ => Err(QueryError::UnknownCategory(raw.to_string())),
        }
    }
}

/// Join topology of a category lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinShape {
    /// Entity table joins `city` directly on `city_id`
    Direct,
    /// `food` joins `restaurant`, which joins `city`
    ViaRestaurant,
}

/// Validate a raw (dimension, category) pair against the whitelists.
/// This is the single gate for caller-supplied identifier strings.
pub fn validate(
    dimension: &str,
    category: &str,
) -> Result<(LocationDimension, Category), QueryError> {
    let dim = LocationDimension::parse(dimension)?;
    let cat = Category::parse(category)?;
    Ok((dim, cat))
}
