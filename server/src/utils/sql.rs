//! SQL utility functions

/// Quote an identifier with double quotes, doubling any embedded quote
///
/// Both SQLite and PostgreSQL accept standard double-quoted identifiers.
/// Only apply this to names that were already matched against the catalog;
/// quoting keeps the catalog spelling exact (PostgreSQL would otherwise
/// fold it to lower case).
///
/// # Example
///
/// ```
/// use brandlink_server::utils::sql::quote_identifier;
///
/// assert_eq!(quote_identifier("followerCount"), "\"followerCount\"");
/// ```
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_plain() {
        assert_eq!(quote_identifier("age"), "\"age\"");
    }

    #[test]
    fn test_quote_identifier_preserves_case() {
        assert_eq!(quote_identifier("BrandDealOne"), "\"BrandDealOne\"");
    }

    #[test]
    fn test_quote_identifier_embedded_quote() {
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_quote_identifier_empty() {
        assert_eq!(quote_identifier(""), "\"\"");
    }
}
