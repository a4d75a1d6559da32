//! SELECT statement assembler

use crate::builder::Statement;
use crate::clause::ClauseBuilder;
use crate::error::{Error, Result};
use crate::ident;
use crate::operator::AggregateFunction;
use crate::param::ParameterStore;
use crate::value::Value;

/// SELECT statement builder
///
/// Accumulates projection, filtering, grouping and ordering state through
/// fallible chained calls, then renders the statement with [`Select::to_sql`].
///
/// # Examples
/// ```
/// use sqlwright::{Select, Statement};
///
/// let query = Select::new("posts")?
///     .select(["title"])?
///     .where_("author", "=", "Alice", Some("author"))?;
///
/// assert_eq!(query.to_sql()?, "SELECT title FROM posts WHERE author = :author");
/// # Ok::<(), sqlwright::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    table: String,
    table_alias: Option<String>,
    projection: Vec<String>,
    distinct: bool,
    group: Option<String>,
    order: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
    where_clause: ClauseBuilder,
    having_clause: ClauseBuilder,
    parameters: ParameterStore,
}

impl Select {
    pub const SORT_ASC: &'static str = "ASC";
    pub const SORT_DESC: &'static str = "DESC";

    /// Create a SELECT builder for `table`, failing fast on an invalid name
    pub fn new(table: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(table) {
            return Err(Error::InvalidTableName {
                table: table.to_string(),
            });
        }

        Ok(Self {
            table: table.to_string(),
            table_alias: None,
            projection: Vec::new(),
            distinct: false,
            group: None,
            order: Vec::new(),
            limit: None,
            offset: None,
            where_clause: ClauseBuilder::new("WHERE"),
            having_clause: ClauseBuilder::new("HAVING"),
            parameters: ParameterStore::new(),
        })
    }

    /// Set an alias for the table
    pub fn table_alias(mut self, alias: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(alias) {
            return Err(Error::invalid_alias("FROM", alias));
        }
        self.table_alias = Some(alias.to_string());
        Ok(self)
    }

    /// SELECT one or more columns
    pub fn select<'a>(mut self, columns: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        for column in columns {
            if !ident::is_valid_sql_name(column) {
                return Err(Error::invalid_column("SELECT", column));
            }
            self.projection.push(column.to_string());
        }
        Ok(self)
    }

    /// SELECT a column under an alias
    pub fn select_as(mut self, column: &str, alias: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column("SELECT", column));
        }
        if !ident::is_valid_sql_name(alias) {
            return Err(Error::invalid_alias(column, alias));
        }
        self.projection.push(format!("{column} AS {alias}"));
        Ok(self)
    }

    /// SELECT an aggregated column under an alias
    pub fn select_aggregate(mut self, column: &str, function: &str, alias: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column("SELECT", column));
        }
        let function = AggregateFunction::parse(function).ok_or_else(|| {
            Error::unexpected_function("SELECT with aggregate function", function)
        })?;
        if !ident::is_valid_sql_name(alias) {
            return Err(Error::invalid_alias(column, alias));
        }
        self.projection.push(format!("{function}({column}) AS {alias}"));
        Ok(self)
    }

    /// SELECT `*`, prepended so it composes with explicit aliased columns
    pub fn select_all(mut self) -> Self {
        self.projection.insert(0, "*".to_string());
        self
    }

    /// SELECT DISTINCT one or more columns
    pub fn distinct<'a>(mut self, columns: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        self.distinct = true;
        self.select(columns)
    }

    /// SELECT DISTINCT a column under an alias
    pub fn distinct_as(mut self, column: &str, alias: &str) -> Result<Self> {
        self.distinct = true;
        self.select_as(column, alias)
    }

    /// SELECT an aggregate over distinct values of a column
    pub fn distinct_aggregate(mut self, column: &str, function: &str, alias: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column("DISTINCT aggregate function", column));
        }
        let function = AggregateFunction::parse(function).ok_or_else(|| {
            Error::unexpected_function("SELECT DISTINCT with aggregate function", function)
        })?;
        if !ident::is_valid_sql_name(alias) {
            return Err(Error::invalid_alias(column, alias));
        }
        self.projection
            .push(format!("{function}(DISTINCT {column}) AS {alias}"));
        Ok(self)
    }

    /// GROUP BY a single column, replacing any previous grouping
    pub fn group(mut self, column: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column("GROUP BY", column));
        }
        self.group = Some(column.to_string());
        Ok(self)
    }

    /// Add a HAVING clause, `FUNC(column) op value`
    pub fn having(mut self, column: &str, function: &str, operator: &str, value: i64) -> Result<Self> {
        self.having_clause
            .aggregate_comparison(column, function, operator, value)?;
        Ok(self)
    }

    /// Add a HAVING clause ORed with the previous HAVING clause
    pub fn having_or(
        mut self,
        column: &str,
        function: &str,
        operator: &str,
        value: i64,
    ) -> Result<Self> {
        self.having_clause
            .or_aggregate_comparison(column, function, operator, value)?;
        Ok(self)
    }

    /// Add an ORDER BY clause; `direction` must be [`Select::SORT_ASC`] or
    /// [`Select::SORT_DESC`]
    pub fn order(mut self, column: &str, direction: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column("ORDER BY", column));
        }
        if direction != Self::SORT_ASC && direction != Self::SORT_DESC {
            return Err(Error::invalid_argument(format!(
                "Order must be {} or {}",
                Self::SORT_ASC,
                Self::SORT_DESC
            )));
        }
        self.order.push(format!("{column} {direction}"));
        Ok(self)
    }

    /// Add a LIMIT clause with an optional OFFSET; both must be non-negative
    pub fn limit(mut self, limit: i64, offset: Option<i64>) -> Result<Self> {
        if limit < 0 {
            return Err(Error::out_of_range("SQL LIMIT can't be less than 0"));
        }
        self.limit = Some(limit);
        if let Some(offset) = offset {
            if offset < 0 {
                return Err(Error::out_of_range("SQL OFFSET can't be less than 0"));
            }
            self.offset = Some(offset);
        }
        Ok(self)
    }

    /// Add a WHERE clause
    pub fn where_(
        mut self,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.where_clause
            .comparison(&mut self.parameters, column, operator, value, parameter)?;
        Ok(self)
    }

    /// Add a WHERE clause ORed with the previous WHERE clause
    pub fn where_or(
        mut self,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.where_clause
            .or_comparison(&mut self.parameters, column, operator, value, parameter)?;
        Ok(self)
    }

    /// Add a WHERE IS NULL clause
    pub fn where_is_null(mut self, column: &str) -> Result<Self> {
        self.where_clause.is_null(column, false)?;
        Ok(self)
    }

    /// Add a WHERE IS NOT NULL clause
    pub fn where_is_not_null(mut self, column: &str) -> Result<Self> {
        self.where_clause.is_null(column, true)?;
        Ok(self)
    }

    /// OR an IS NULL test with the previous WHERE clause
    pub fn where_or_is_null(mut self, column: &str) -> Result<Self> {
        self.where_clause.or_is_null(column, false)?;
        Ok(self)
    }

    /// OR an IS NOT NULL test with the previous WHERE clause
    pub fn where_or_is_not_null(mut self, column: &str) -> Result<Self> {
        self.where_clause.or_is_null(column, true)?;
        Ok(self)
    }

    /// Add a WHERE LIKE clause
    pub fn where_like(
        mut self,
        column: &str,
        pattern: &str,
        escape_char: Option<&str>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.where_clause.like(
            &mut self.parameters,
            column,
            pattern,
            escape_char,
            parameter,
            false,
        )?;
        Ok(self)
    }

    /// Add a WHERE NOT LIKE clause
    pub fn where_not_like(
        mut self,
        column: &str,
        pattern: &str,
        escape_char: Option<&str>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.where_clause.like(
            &mut self.parameters,
            column,
            pattern,
            escape_char,
            parameter,
            true,
        )?;
        Ok(self)
    }

    /// Add a WHERE BETWEEN clause, bounds inlined as literals
    pub fn where_between(
        mut self,
        column: &str,
        start: impl Into<Value>,
        end: impl Into<Value>,
    ) -> Result<Self> {
        self.where_clause.between(column, start, end, false)?;
        Ok(self)
    }

    /// Add a WHERE NOT BETWEEN clause, bounds inlined as literals
    pub fn where_not_between(
        mut self,
        column: &str,
        start: impl Into<Value>,
        end: impl Into<Value>,
    ) -> Result<Self> {
        self.where_clause.between(column, start, end, true)?;
        Ok(self)
    }

    /// Add a WHERE IN clause, binding every value anonymously
    pub fn where_in(mut self, column: &str, values: Vec<Value>) -> Result<Self> {
        self.where_clause
            .in_list(&mut self.parameters, column, values, false)?;
        Ok(self)
    }

    /// Add a WHERE NOT IN clause, binding every value anonymously
    pub fn where_not_in(mut self, column: &str, values: Vec<Value>) -> Result<Self> {
        self.where_clause
            .in_list(&mut self.parameters, column, values, true)?;
        Ok(self)
    }

    /// `SELECT [DISTINCT] <projection> FROM <table>[ AS <alias>]`
    pub(crate) fn build_select_head(&self) -> Vec<String> {
        let mut parts = vec!["SELECT".to_string()];
        if self.distinct {
            parts.push("DISTINCT".to_string());
        }
        if self.projection.is_empty() {
            parts.push("*".to_string());
        } else {
            parts.push(self.projection.join(", "));
        }
        parts.push("FROM".to_string());
        parts.push(self.table.clone());
        if let Some(alias) = &self.table_alias {
            parts.push("AS".to_string());
            parts.push(alias.clone());
        }
        parts
    }

    /// `[WHERE ..] [GROUP BY ..] [HAVING ..] [ORDER BY ..] [LIMIT .. [OFFSET ..]]`
    pub(crate) fn build_tail_clauses(&self) -> Result<Vec<String>> {
        if self.limit.is_some() && self.order.is_empty() {
            return Err(Error::dangerous_query(
                "When using LIMIT, it is important to use an ORDER BY clause that constrains \
                 the result rows into a unique order. Otherwise you will get an unpredictable \
                 subset of the query's rows.",
            ));
        }

        let mut clauses = Vec::new();

        if !self.where_clause.is_empty() {
            clauses.push("WHERE".to_string());
            clauses.push(self.where_clause.render());
        }

        if let Some(group) = &self.group {
            clauses.push("GROUP BY".to_string());
            clauses.push(group.clone());
        }

        if !self.having_clause.is_empty() {
            clauses.push("HAVING".to_string());
            clauses.push(self.having_clause.render());
        }

        if !self.order.is_empty() {
            clauses.push("ORDER BY".to_string());
            clauses.push(self.order.join(", "));
        }

        if let Some(limit) = self.limit {
            clauses.push("LIMIT".to_string());
            clauses.push(limit.to_string());

            if let Some(offset) = self.offset {
                clauses.push("OFFSET".to_string());
                clauses.push(offset.to_string());
            }
        }

        Ok(clauses)
    }

    pub(crate) fn table_name(&self) -> &str {
        &self.table
    }
}

impl Statement for Select {
    fn to_sql(&self) -> Result<String> {
        let mut parts = self.build_select_head();
        parts.extend(self.build_tail_clauses()?);
        Ok(parts.join(" "))
    }

    fn bindings(&self) -> &[(String, Value)] {
        self.parameters.bindings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_select() {
        let query = Select::new("posts").unwrap();
        assert_eq!(query.to_sql().unwrap(), "SELECT * FROM posts");
    }

    #[test]
    fn test_select_columns() {
        let query = Select::new("posts")
            .unwrap()
            .select(["title", "category"])
            .unwrap();
        assert_eq!(query.to_sql().unwrap(), "SELECT title, category FROM posts");
    }

    #[test]
    fn test_select_all_prepends() {
        let query = Select::new("posts")
            .unwrap()
            .select_as("title", "t")
            .unwrap()
            .select_all();
        assert_eq!(query.to_sql().unwrap(), "SELECT *, title AS t FROM posts");
    }

    #[test]
    fn test_select_aggregate() {
        let query = Select::new("posts")
            .unwrap()
            .select_aggregate("title", "COUNT", "nb_titles")
            .unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT COUNT(title) AS nb_titles FROM posts"
        );
    }

    #[test]
    fn test_distinct_aggregate() {
        let query = Select::new("posts")
            .unwrap()
            .distinct_aggregate("title", "COUNT", "nb_titles")
            .unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT COUNT(DISTINCT title) AS nb_titles FROM posts"
        );
    }

    #[test]
    fn test_distinct_columns() {
        let query = Select::new("posts")
            .unwrap()
            .distinct(["title", "category"])
            .unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT DISTINCT title, category FROM posts"
        );
    }

    #[test]
    fn test_table_alias() {
        let query = Select::new("posts").unwrap().table_alias("p").unwrap();
        assert_eq!(query.to_sql().unwrap(), "SELECT * FROM posts AS p");
    }

    #[test]
    fn test_group_replaces_previous_grouping() {
        let query = Select::new("posts")
            .unwrap()
            .group("author")
            .unwrap()
            .group("category")
            .unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT * FROM posts GROUP BY category"
        );
    }

    #[test]
    fn test_having_or() {
        let query = Select::new("demo")
            .unwrap()
            .having("score", "MAX", ">=", 500)
            .unwrap()
            .having_or("score", "AVG", ">", 200)
            .unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT * FROM demo HAVING (MAX(score) >= 500 OR AVG(score) > 200)"
        );
    }

    #[test]
    fn test_order_and_limit_offset() {
        let query = Select::new("posts")
            .unwrap()
            .order("published_at", Select::SORT_DESC)
            .unwrap()
            .limit(10, Some(20))
            .unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT * FROM posts ORDER BY published_at DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_limit_without_order_is_refused() {
        let query = Select::new("test").unwrap().limit(5, None).unwrap();
        let err = query.to_sql().unwrap_err();
        assert!(matches!(err, Error::DangerousQuery { .. }));
    }

    #[test]
    fn test_limit_refused_then_order_added_succeeds() {
        let query = Select::new("test").unwrap().limit(5, None).unwrap();
        assert!(query.to_sql().is_err());
        let query = query.order("x", Select::SORT_ASC).unwrap();
        assert_eq!(
            query.to_sql().unwrap(),
            "SELECT * FROM test ORDER BY x ASC LIMIT 5"
        );
    }

    #[test]
    fn test_negative_limit_and_offset() {
        let err = Select::new("posts").unwrap().limit(-1, None).unwrap_err();
        assert_eq!(err, Error::out_of_range("SQL LIMIT can't be less than 0"));

        let err = Select::new("posts").unwrap().limit(1, Some(-5)).unwrap_err();
        assert_eq!(err, Error::out_of_range("SQL OFFSET can't be less than 0"));
    }

    #[test]
    fn test_invalid_order_direction() {
        let err = Select::new("posts")
            .unwrap()
            .order("x", "DOWN")
            .unwrap_err();
        assert_eq!(err, Error::invalid_argument("Order must be ASC or DESC"));
    }

    #[test]
    fn test_invalid_table_name() {
        let err = Select::new("2posts").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTableName {
                table: "2posts".to_string()
            }
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let query = Select::new("posts")
            .unwrap()
            .where_("author", "=", "x", Some("a"))
            .unwrap();
        assert_eq!(query.to_sql().unwrap(), query.to_sql().unwrap());
    }
}
