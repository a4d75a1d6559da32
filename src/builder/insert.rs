//! INSERT statement assembler

use crate::builder::{FieldBindings, Statement};
use crate::error::{Error, Result};
use crate::ident;
use crate::param::ParameterStore;
use crate::value::Value;

/// INSERT statement builder
///
/// # Examples
/// ```
/// use sqlwright::{Insert, Statement};
///
/// let query = Insert::new("posts")?
///     .bind_field("username", "Alice", Some("u"))?
///     .bind_field("age", 20, Some("a"))?;
///
/// assert_eq!(
///     query.to_sql()?,
///     "INSERT INTO posts (username, age) VALUES (:u, :a)"
/// );
/// # Ok::<(), sqlwright::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Insert {
    table: String,
    fields: FieldBindings,
    parameters: ParameterStore,
}

impl Insert {
    /// Create an INSERT builder for `table`, failing fast on an invalid name
    pub fn new(table: &str) -> Result<Self> {
        if !ident::is_valid_sql_name(table) {
            return Err(Error::InvalidTableName {
                table: table.to_string(),
            });
        }

        Ok(Self {
            table: table.to_string(),
            fields: FieldBindings::default(),
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
}

impl Statement for Insert {
    fn to_sql(&self) -> Result<String> {
        if self.fields.is_empty() {
            return Err(Error::NoFields);
        }

        let mut columns = Vec::new();
        let mut placeholders = Vec::new();
        for (column, parameter) in self.fields.entries() {
            columns.push(column);
            placeholders.push(format!(":{parameter}"));
        }

        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        ))
    }

    fn bindings(&self) -> &[(String, Value)] {
        self.parameters.bindings()
    }
}
