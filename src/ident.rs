//! SQL identifier and bind-parameter name validation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::reserved;

/// Grammar for table/column/alias names: dotted paths of lowercase segments.
static SQL_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*(\.[a-z0-9_]+)*$").unwrap());

/// Grammar for bind-parameter names: letters only, no dots or digits.
static SQL_PARAMETER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

/// Check whether `name` is an acceptable SQL identifier.
///
/// Accepts dotted paths (`table`, `table.column`, `schema.table.column`) of
/// lowercase letters, digits and underscores, starting with a letter or
/// underscore, and rejects reserved words case-insensitively. Never fails.
///
/// # Examples
/// ```
/// use sqlwright::ident::is_valid_sql_name;
///
/// assert!(is_valid_sql_name("posts"));
/// assert!(is_valid_sql_name("p.field"));
/// assert!(!is_valid_sql_name("2col"));
/// assert!(!is_valid_sql_name("select"));
/// ```
pub fn is_valid_sql_name(name: &str) -> bool {
    SQL_NAME_PATTERN.is_match(name) && !reserved::is_reserved(name)
}

/// Check whether `name` is an acceptable bind-parameter name.
///
/// Parameter names live in the statement's bind-variable namespace, not the
/// column namespace, so the grammar is stricter: ASCII letters only.
pub fn is_valid_sql_parameter(name: &str) -> bool {
    SQL_PARAMETER_PATTERN.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sql_names() {
        assert!(is_valid_sql_name("p"));
        assert!(is_valid_sql_name("p.field"));
        assert!(is_valid_sql_name("schema.table_name.col"));
        assert!(is_valid_sql_name("_hidden"));
        assert!(is_valid_sql_name("col2"));
    }

    #[test]
    fn test_invalid_sql_names() {
        assert!(!is_valid_sql_name("2col"));
        assert!(!is_valid_sql_name("p."));
        assert!(!is_valid_sql_name("58p"));
        assert!(!is_valid_sql_name(""));
        assert!(!is_valid_sql_name("Posts"));
        assert!(!is_valid_sql_name("po sts"));
    }

    #[test]
    fn test_reserved_words_rejected_case_insensitively() {
        assert!(!is_valid_sql_name("select"));
        assert!(!is_valid_sql_name("from"));
        assert!(!is_valid_sql_name("where"));
    }

    #[test]
    fn test_valid_parameter_names() {
        assert!(is_valid_sql_parameter("a"));
        assert!(is_valid_sql_parameter("firstAuthor"));
        assert!(is_valid_sql_parameter("ID"));
    }

    #[test]
    fn test_invalid_parameter_names() {
        assert!(!is_valid_sql_parameter("p1"));
        assert!(!is_valid_sql_parameter("p.field"));
        assert!(!is_valid_sql_parameter("first_author"));
        assert!(!is_valid_sql_parameter(""));
    }
}
