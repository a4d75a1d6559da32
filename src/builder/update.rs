//! UPDATE statement assembler

use crate::builder::{FieldBindings, Statement};
use crate::clause::ClauseBuilder;
use crate::error::{Error, Result};
use crate::ident;
use crate::param::ParameterStore;
use crate::value::Value;

/// UPDATE statement builder
///
/// Rendering refuses an UPDATE with no WHERE clause; an unconstrained UPDATE
/// rewrites the whole table.
///
/// # Examples
/// ```
/// use sqlwright::{Update, Statement};
///
/// let query = Update::new("posts")?
///     .bind_field("title", "Revised", Some("t"))?
///     .where_("id", "=", 7, Some("id"))?;
///
/// assert_eq!(query.to_sql()?, "UPDATE posts SET title = :t WHERE id = :id");
/// # Ok::<(), sqlwright::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Update {
    table: String,
    fields: FieldBindings,
    where_clause: ClauseBuilder,
    parameters: ParameterStore,
}

impl Update {
    /// Create an UPDATE builder for `table`, failing fast on an invalid name
    pub fn new(table: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(table) {
            return Err(Error::InvalidTableName {
                table: table.to_string(),
            });
        }

        Ok(Self {
            table: table.to_string(),
            fields: FieldBindings::default(),
            where_clause: ClauseBuilder::new("WHERE"),
            parameters: ParameterStore::new(),
        })
    }

    /// Bind a field to a parameter holding `value`
    pub fn bind_field(
        mut self,
        field: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<Self> {
        self.fields
            .bind(&mut self.parameters, field, value, parameter)?;
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
}

impl Statement for Update {
    fn to_sql(&self) -> Result<String> {
        if self.fields.is_empty() {
            return Err(Error::NoFields);
        }
        if self.where_clause.is_empty() {
            return Err(Error::dangerous_query("No WHERE clause in UPDATE query"));
        }

        let assignments: Vec<String> = self
            .fields
            .entries()
            .map(|(column, parameter)| format!("{column} = :{parameter}"))
            .collect();

        Ok(format!(
            "UPDATE {} SET {} WHERE {}",
            self.table,
            assignments.join(", "),
            self.where_clause.render()
        ))
    }

    fn bindings(&self) -> &[(String, Value)] {
        self.parameters.bindings()
    }
}
