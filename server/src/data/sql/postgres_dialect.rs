//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn like_needs_text_cast(&self) -> bool {
        true
    }

    fn list_tables_sql(&self) -> &'static str {
        "SELECT table_name::text FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_type = 'BASE TABLE' \
         ORDER BY table_name"
    }

    fn list_columns_sql(&self) -> &'static str {
        "SELECT column_name::text FROM information_schema.columns \
         WHERE table_schema = current_schema() AND table_name = :table \
         ORDER BY ordinal_position"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.placeholder(1), "$1");
        assert_eq!(dialect.placeholder(12), "$12");
    }

    #[test]
    fn test_name() {
        assert_eq!(PostgresDialect.name(), "postgres");
    }

    #[test]
    fn test_like_needs_text_cast() {
        assert!(PostgresDialect.like_needs_text_cast());
        assert!(!crate::data::sql::SqliteDialect.like_needs_text_cast());
    }
}
