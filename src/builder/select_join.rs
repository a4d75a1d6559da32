//! SELECT with JOIN statement assembler

use std::fmt::{self, Display};

use crate::builder::select::Select;
use crate::builder::Statement;
use crate::error::{Error, Result};
use crate::ident;
use crate::value::Value;

/// Kind of JOIN between the base table and the joined table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Cross,
    Full,
    Inner,
    Left,
    Natural,
    Right,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cross => "CROSS",
            Self::Full => "FULL",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Natural => "NATURAL",
            Self::Right => "RIGHT",
        }
    }

    /// CROSS and NATURAL joins carry no ON clause
    fn has_on_clause(&self) -> bool {
        !matches!(self, Self::Cross | Self::Natural)
    }
}

impl Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SELECT statement builder joining a second table
///
/// Owns a [`Select`] for the base-table state and adds the join
/// specification. Rendering fails until one of the join-kind methods has
/// been called.
///
/// # Examples
/// ```
/// use sqlwright::{SelectJoin, Statement};
///
/// let query = SelectJoin::new("posts", "users")?
///     .inner_join("author_id", "id")?;
///
/// assert_eq!(
///     query.to_sql()?,
///     "SELECT * FROM posts INNER JOIN users ON posts.author_id = users.id"
/// );
/// # Ok::<(), sqlwright::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SelectJoin {
    select: Select,
    join_table: String,
    join_table_alias: Option<String>,
    join_type: Option<JoinType>,
    join_on: Option<String>,
}

impl SelectJoin {
    /// Create a joined SELECT builder; both table names are validated
    pub fn new(table: &str, join_table: &str) -> Result<Self> {
        let select = Select::new(table)?;

        if !ident::is_valid_sql_name(join_table) {
            return Err(Error::InvalidTableName {
                table: join_table.to_string(),
            });
        }

        Ok(Self {
            select,
            join_table: join_table.to_string(),
            join_table_alias: None,
            join_type: None,
            join_on: None,
        })
    }

    /// Set an alias for the joined table
    pub fn join_table_alias(mut self, alias: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(alias) {
            return Err(Error::invalid_alias("JOIN TABLE ALIAS", alias));
        }
        self.join_table_alias = Some(alias.to_string());
        Ok(self)
    }

    /// CROSS JOIN the two tables (no ON clause)
    pub fn cross_join(mut self) -> Self {
        self.join_type = Some(JoinType::Cross);
        self
    }

    /// NATURAL JOIN the two tables (no ON clause)
    pub fn natural_join(mut self) -> Self {
        self.join_type = Some(JoinType::Natural);
        self
    }

    /// FULL JOIN on `base.column = joined.foreign_column`
    pub fn full_join(self, column: &str, foreign_column: &str) -> Result<Self> {
        self.join_on(column, foreign_column, JoinType::Full)
    }

    /// INNER JOIN on `base.column = joined.foreign_column`
    pub fn inner_join(self, column: &str, foreign_column: &str) -> Result<Self> {
        self.join_on(column, foreign_column, JoinType::Inner)
    }

    /// LEFT JOIN on `base.column = joined.foreign_column`
    pub fn left_join(self, column: &str, foreign_column: &str) -> Result<Self> {
        self.join_on(column, foreign_column, JoinType::Left)
    }

    /// RIGHT JOIN on `base.column = joined.foreign_column`
    pub fn right_join(self, column: &str, foreign_column: &str) -> Result<Self> {
        self.join_on(column, foreign_column, JoinType::Right)
    }

    fn join_on(mut self, column: &str, foreign_column: &str, join_type: JoinType) -> Result<Self> {
        let clause = format!("{join_type} JOIN");
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column(clause, column));
        }
        if !ident::is_valid_sql_name(foreign_column) {
            return Err(Error::invalid_column(clause, foreign_column));
        }

        self.join_on = Some(format!(
            "{}.{column} = {}.{foreign_column}",
            self.select_table(),
            self.join_table
        ));
        self.join_type = Some(join_type);
        Ok(self)
    }

    fn select_table(&self) -> &str {
        self.select.table_name()
    }

    fn build_join_clause(&self) -> Result<Vec<String>> {
        let join_type = self.join_type.ok_or(Error::NoJoinType)?;

        let mut clause = vec![join_type.to_string(), "JOIN".to_string(), self.join_table.clone()];

        if let Some(alias) = &self.join_table_alias {
            clause.push("AS".to_string());
            clause.push(alias.clone());
        }

        if join_type.has_on_clause() {
            if let Some(on) = &self.join_on {
                clause.push("ON".to_string());
                clause.push(on.clone());
            }
        }

        Ok(clause)
    }

    // Base-table SELECT surface, delegated to the owned builder.

    pub fn table_alias(mut self, alias: &str) -> Result<Self> {
        self.select = self.select.table_alias(alias)?;
        Ok(self)
    }

    pub fn select<'a>(mut self, columns: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        self.select = self.select.select(columns)?;
        Ok(self)
    }

    pub fn select_as(mut self, column: &str, alias: &str) -> Result<Self> {
        self.select = self.select.select_as(column, alias)?;
        Ok(self)
    }

    pub fn select_aggregate(mut self, column: &str, function: &str, alias: &str) -> Result<Self> {
        self.select = self.select.select_aggregate(column, function, alias)?;
        Ok(self)
    }

    pub fn select_all(mut self) -> Self {
        self.select = self.select.select_all();
        self
    }

    pub fn distinct<'a>(mut self, columns: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        self.select = self.select.distinct(columns)?;
        Ok(self)
    }

    pub fn distinct_as(mut self, column: &str, alias: &str) -> Result<Self> {
        self.select = self.select.distinct_as(column, alias)?;
        Ok(self)
    }

    pub fn distinct_aggregate(mut self, column: &str, function: &str, alias: &str) -> Result<Self> {
        self.select = self.select.distinct_aggregate(column, function, alias)?;
        Ok(self)
    }

    pub fn group(mut self, column: &str) -> Result<Self> {
        self.select = self.select.group(column)?;
        Ok(self)
    }

    pub fn having(mut self, column: &str, function: &str, operator: &str, value: i64) -> Result<Self> {
        self.select = self.select.having(column, function, operator, value)?;
        Ok(self)
    }

    pub fn having_or(
        mut self,
        column: &str,
        function: &str,
        operator: &str,
        value: i64,
    ) -> Result<Self> {
        self.select = self.select.having_or(column, function, operator, value)?;
        Ok(self)
    }

    pub fn order(mut self, column: &str, direction: &str) -> Result<Self> {
        self.select = self.select.order(column, direction)?;
        Ok(self)
    }

    pub fn limit(mut self, limit: i64, offset: Option<i64>) -> Result<Self> {
        self.select = self.select.limit(limit, offset)?;
        Ok(self)
    }

    pub fn where_(
        mut self,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.select = self.select.where_(column, operator, value, parameter)?;
        Ok(self)
    }

    pub fn where_or(
        mut self,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.select = self.select.where_or(column, operator, value, parameter)?;
        Ok(self)
    }

    pub fn where_is_null(mut self, column: &str) -> Result<Self> {
        self.select = self.select.where_is_null(column)?;
        Ok(self)
    }

    pub fn where_is_not_null(mut self, column: &str) -> Result<Self> {
        self.select = self.select.where_is_not_null(column)?;
        Ok(self)
    }

    pub fn where_or_is_null(mut self, column: &str) -> Result<Self> {
        self.select = self.select.where_or_is_null(column)?;
        Ok(self)
    }

    pub fn where_or_is_not_null(mut self, column: &str) -> Result<Self> {
        self.select = self.select.where_or_is_not_null(column)?;
        Ok(self)
    }

    pub fn where_like(
        mut self,
        column: &str,
        pattern: &str,
        escape_char: Option<&str>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.select = self
            .select
            .where_like(column, pattern, escape_char, parameter)?;
        Ok(self)
    }

    pub fn where_not_like(
        mut self,
        column: &str,
        pattern: &str,
        escape_char: Option<&str>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.select = self
            .select
            .where_not_like(column, pattern, escape_char, parameter)?;
        Ok(self)
    }

    pub fn where_between(
        mut self,
        column: &str,
        start: impl Into<Value>,
        end: impl Into<Value>,
    ) -> Result<Self> {
        self.select = self.select.where_between(column, start, end)?;
        Ok(self)
    }

    pub fn where_not_between(
        mut self,
        column: &str,
        start: impl Into<Value>,
        end: impl Into<Value>,
    ) -> Result<Self> {
        self.select = self.select.where_not_between(column, start, end)?;
        Ok(self)
    }

    pub fn where_in(mut self, column: &str, values: Vec<Value>) -> Result<Self> {
        self.select = self.select.where_in(column, values)?;
        Ok(self)
    }

    pub fn where_not_in(mut self, column: &str, values: Vec<Value>) -> Result<Self> {
        self.select = self.select.where_not_in(column, values)?;
        Ok(self)
    }
}

impl Statement for SelectJoin {
    fn to_sql(&self) -> Result<String> {
        let mut parts = self.select.build_select_head();
        parts.extend(self.build_join_clause()?);
        parts.extend(self.select.build_tail_clauses()?);
        Ok(parts.join(" "))
    }

    fn bindings(&self) -> &[(String, Value)] {
        self.select.bindings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_join() {
        let query = SelectJoin::new("posts", "users")
            .unwrap()
            .inner_join("author_id", "id")
            .unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT * FROM posts INNER JOIN users ON posts.author_id = users.id"
        );
    }

    #[test]
    fn test_cross_join_has_no_on_clause() {
        let query = SelectJoin::new("posts", "users").unwrap().cross_join();
        assert_eq!(query.to_sql().unwrap(), "SELECT * FROM posts CROSS JOIN users");
    }

    #[test]
    fn test_natural_join_has_no_on_clause() {
        let query = SelectJoin::new("posts", "users").unwrap().natural_join();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT * FROM posts NATURAL JOIN users"
        );
    }

    #[test]
    fn test_left_join_with_alias_and_where() {
        let query = SelectJoin::new("posts", "users")
            .unwrap()
            .join_table_alias("u")
            .unwrap()
            .left_join("author_id", "id")
            .unwrap()
            .where_("category", "=", "news", Some("cat"))
            .unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT * FROM posts LEFT JOIN users AS u ON posts.author_id = users.id \
             WHERE category = :cat"
        );
    }

    #[test]
    fn test_render_without_join_type_fails() {
        let query = SelectJoin::new("posts", "users").unwrap();
        assert_eq!(query.to_sql().unwrap_err(), Error::NoJoinType);
    }

    #[test]
    fn test_invalid_join_table() {
        let err = SelectJoin::new("posts", "2users").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTableName {
                table: "2users".to_string()
            }
        );
    }

    #[test]
    fn test_join_column_validation() {
        let err = SelectJoin::new("posts", "users")
            .unwrap()
            .right_join("author id", "id")
            .unwrap_err();
        assert_eq!(err, Error::invalid_column("RIGHT JOIN", "author id"));
    }
}
