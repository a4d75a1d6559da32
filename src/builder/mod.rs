//! Statement assemblers
//!
//! One assembler per statement kind. Each instance accumulates state for
//! exactly one statement and is discarded after rendering.

pub mod delete;
pub mod insert;
pub mod select;
pub mod select_join;
pub mod update;

pub use delete::Delete;
pub use insert::Insert;
pub use select::Select;
pub use select_join::{JoinType, SelectJoin};
pub use update::Update;

use crate::error::{Error, Result};
use crate::ident;
use crate::param::ParameterStore;
use crate::value::Value;

/// Common surface of every statement assembler
pub trait Statement {
    /// Render the final SQL text
    fn to_sql(&self) -> Result<String>;

    /// The named-parameter bindings to hand to a prepared-statement executor,
    /// in insertion order
    fn bindings(&self) -> &[(String, Value)];
}

/// Ordered column-to-parameter bindings shared by INSERT and UPDATE
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldBindings {
    fields: Vec<(String, String)>,
}

impl FieldBindings {
    /// Bind `field` to a parameter holding `value`.
    ///
    /// Re-binding an existing field replaces its parameter but keeps its
    /// position in the column order.
    pub(crate) fn bind(
        &mut self,
        store: &mut ParameterStore,
        field: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<()> {
        if !ident::is_valid_sql_name(field) {
            return Err(Error::InvalidFieldName {
                field: field.to_string(),
            });
        }

        let parameter = store.bind(parameter, value)?;

        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some(entry) => entry.1 = parameter,
            None => self.fields.push((field.to_string(), parameter)),
        }
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `(column, parameter)` pairs in binding insertion order
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, parameter)| (field.as_str(), parameter.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_preserves_insertion_order() {
        let mut store = ParameterStore::new();
        let mut fields = FieldBindings::default();
        fields.bind(&mut store, "username", "Alice", Some("u")).unwrap();
        fields.bind(&mut store, "age", 20, Some("a")).unwrap();
        let entries: Vec<_> = fields.entries().collect();
        assert_eq!(entries, vec![("username", "u"), ("age", "a")]);
    }

    #[test]
    fn test_rebinding_keeps_position() {
        let mut store = ParameterStore::new();
        let mut fields = FieldBindings::default();
        fields.bind(&mut store, "username", "Alice", Some("u")).unwrap();
        fields.bind(&mut store, "age", 20, Some("a")).unwrap();
        fields.bind(&mut store, "username", "Bob", Some("v")).unwrap();
        let entries: Vec<_> = fields.entries().collect();
        assert_eq!(entries, vec![("username", "v"), ("age", "a")]);
    }

    #[test]
    fn test_invalid_field_name() {
        let mut store = ParameterStore::new();
        let mut fields = FieldBindings::default();
        let err = fields.bind(&mut store, "2fa", 1, None).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidFieldName {
                field: "2fa".to_string()
            }
        );
        assert!(store.is_empty());
    }
}
