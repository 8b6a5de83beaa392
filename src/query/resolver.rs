//! Builds the two lookup statement shapes.
//!
//! Table and column identifiers come exclusively from the vocabulary enums;
//! the filter value is always left to parameter binding.

use super::vocab::{Category, JoinShape, LocationDimension};

/// Upper bound on rows returned by a random sample
pub const RANDOM_SAMPLE_LIMIT: u32 = 6;

/// SELECT joining the category's table(s) to `city`, filtered on the given
/// dimension. The filter value is the statement's single `?` parameter.
pub fn lookup_sql(dimension: LocationDimension, category: Category) -> String {
    format!(
        "{} WHERE {}.{} = ?",
        join_clause(category),
        city_alias(category),
        dimension.column()
    )
}

/// Same join shapes with no filter, returning a bounded random subset
pub fn random_sql(category: Category) -> String {
    format!(
        "{} ORDER BY RANDOM() LIMIT {}",
        join_clause(category),
        RANDOM_SAMPLE_LIMIT
    )
}

fn join_clause(category: Category) -> String {
    match category.join_shape() {
        JoinShape::Direct => format!(
            "SELECT * FROM {table} JOIN city ON {table}.city_id = city.city_id",
            table = category.table(),
        ),
        JoinShape::ViaRestaurant => "SELECT * FROM restaurant r \
             JOIN food f ON r.rest_id = f.restaurant_id \
             JOIN city c ON c.city_id = r.city_id"
            .to_string(),
    }
}

fn city_alias(category: Category) -> &'static str {
    match category.join_shape() {
        JoinShape::Direct => "city",
        JoinShape::ViaRestaurant => "c",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_lookup_shape() {
        let sql = lookup_sql(LocationDimension::Country, Category::Museum);
        assert_eq!(
            sql,
            "SELECT * FROM museum JOIN city ON museum.city_id = city.city_id \
             WHERE city.country = ?"
        );
    }

    #[test]
    fn test_food_lookup_joins_via_restaurant() {
        let sql = lookup_sql(LocationDimension::CityName, Category::Food);
        assert!(sql.starts_with("SELECT * FROM restaurant r JOIN food f"));
        assert!(sql.contains("r.rest_id = f.restaurant_id"));
        assert!(sql.contains("c.city_id = r.city_id"));
        assert!(sql.ends_with("WHERE c.city_name = ?"));
    }

    #[test]
    fn test_lookup_binds_exactly_one_parameter() {
        for dim in LocationDimension::ALL {
            for cat in Category::ALL {
                assert_eq!(lookup_sql(dim, cat).matches('?').count(), 1);
            }
        }
    }

    #[test]
    fn test_random_has_no_filter_and_bounded_limit() {
        for cat in Category::ALL {
            let sql = random_sql(cat);
            assert!(!sql.contains("WHERE"));
            assert!(!sql.contains('?'));
            assert!(sql.ends_with("ORDER BY RANDOM() LIMIT 6"));
        }
    }
}
