//! Table schema definitions for the city guide database

use super::types::*;

pub static CITY: TableSchema = TableSchema {
    name: "city",
    source_file: "city.csv",
    primary_key: "city_id",
    columns: &[
        Column::required("city_id", ColumnType::Integer),
        Column::required("city_name", ColumnType::Text),
        Column::required("country", ColumnType::Text),
        Column::required("continent", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static RESTAURANT: TableSchema = TableSchema {
    name: "restaurant",
    source_file: "restaurant.csv",
    primary_key: "rest_id",
    columns: &[
        Column::required("rest_id", ColumnType::Integer),
        Column::required("city_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::new("avg_price", ColumnType::Real),
        Column::new("description", ColumnType::Text),
    ],
    foreign_keys: &[ForeignKey::new("city_id", "city", "city_id")],
};

/// Food joins city transitively through restaurant, one hop further than the
/// other categories.
pub static FOOD: TableSchema = TableSchema {
    name: "food",
    source_file: "food.csv",
    primary_key: "food_id",
    columns: &[
        Column::required("food_id", ColumnType::Integer),
        Column::required("restaurant_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::new("price", ColumnType::Real),
        Column::new("description", ColumnType::Text),
    ],
    foreign_keys: &[ForeignKey::new("restaurant_id", "restaurant", "rest_id")],
};

pub static MUSEUM: TableSchema = TableSchema {
    name: "museum",
    source_file: "museum.csv",
    primary_key: "museum_id",
    columns: &[
        Column::required("museum_id", ColumnType::Integer),
        Column::required("city_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::new("type", ColumnType::Text),
        Column::new("description", ColumnType::Text),
    ],
    foreign_keys: &[ForeignKey::new("city_id", "city", "city_id")],
};

pub static SIGHT: TableSchema = TableSchema {
    name: "sight",
    source_file: "sight.csv",
    primary_key: "sight_id",
    columns: &[
        Column::required("sight_id", ColumnType::Integer),
        Column::required("city_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::new("description", ColumnType::Text),
    ],
    foreign_keys: &[ForeignKey::new("city_id", "city", "city_id")],
};

pub static PARK: TableSchema = TableSchema {
    name: "park",
    source_file: "park.csv",
    primary_key: "park_id",
    columns: &[
        Column::required("park_id", ColumnType::Integer),
        Column::required("city_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::new("type", ColumnType::Text),
        Column::new("description", ColumnType::Text),
    ],
    foreign_keys: &[ForeignKey::new("city_id", "city", "city_id")],
};

/// All table schemas in creation order: parents before children, so city
/// comes first and restaurant precedes food.
pub static ALL_TABLES: &[&TableSchema] = &[&CITY, &RESTAURANT, &FOOD, &MUSEUM, &SIGHT, &PARK];

/// Seeding order. Museum, sight and park reference only city, which is
/// already loaded, so they may precede restaurant; food rows must follow
/// restaurant rows.
pub static SEED_ORDER: &[&TableSchema] = &[&CITY, &MUSEUM, &SIGHT, &PARK, &RESTAURANT, &FOOD];

/// Get table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_resolve() {
        for table in ALL_TABLES {
            for fk in table.foreign_keys {
                let parent = get_table(fk.references_table)
                    .unwrap_or_else(|| panic!("{}: unknown FK target", table.name));
                assert_eq!(parent.primary_key, fk.references_column);
            }
        }
    }

    #[test]
    fn test_creation_order_satisfies_dependencies() {
        let names: Vec<_> = ALL_TABLES.iter().map(|t| t.name).collect();
        for (pos, table) in ALL_TABLES.iter().enumerate() {
            for fk in table.foreign_keys {
                let parent_pos = names.iter().position(|&n| n == fk.references_table).unwrap();
                assert!(parent_pos < pos, "{} created before {}", table.name, fk.references_table);
            }
        }
    }

    #[test]
    fn test_seed_order_covers_all_tables() {
        assert_eq!(SEED_ORDER.len(), ALL_TABLES.len());
        let seed_names: Vec<_> = SEED_ORDER.iter().map(|t| t.name).collect();
        assert_eq!(seed_names[0], "city");
        let rest = seed_names.iter().position(|&n| n == "restaurant").unwrap();
        let food = seed_names.iter().position(|&n| n == "food").unwrap();
        assert!(rest < food);
    }
}
