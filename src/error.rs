//! Error types for sqlwright

use thiserror::Error;

/// The main error type for statement building operations
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Table name fails the SQL name grammar or is a reserved word
    #[error("Table name `{table}` is invalid.")]
    InvalidTableName { table: String },

    /// Column name fails the SQL name grammar or is a reserved word
    #[error("Column name `{column}` provided for {clause} clause is invalid.")]
    InvalidColumnName { clause: String, column: String },

    /// Alias fails the SQL name grammar or is a reserved word
    #[error("Alias `{alias}` provided for {context} is invalid.")]
    InvalidAliasName { context: String, alias: String },

    /// Field name in an INSERT/UPDATE binding fails the SQL name grammar
    #[error("Field name `{field}` provided to the statement is invalid.")]
    InvalidFieldName { field: String },

    /// Bind-parameter name is not letters-only
    #[error("SQL parameter `{parameter}` provided to the statement is invalid.")]
    InvalidParameterName { parameter: String },

    /// Bind-parameter name collides with an already bound one
    #[error("SQL parameter `{parameter}` provided to the statement has already been provided.")]
    DuplicateParameter { parameter: String },

    /// Comparison operator outside the closed enumeration
    #[error("Comparison operator `{operator}` provided for {clause} clause is invalid or unsupported.{hint}")]
    UnexpectedOperator {
        clause: String,
        operator: String,
        hint: String,
    },

    /// Aggregate function outside the closed enumeration
    #[error("Aggregation function `{function}` used in {clause} clause is invalid or unsupported.")]
    UnexpectedFunction { clause: String, function: String },

    /// OR-merge requested with no prior clause to merge into
    #[error("Need to define at least another {clause} clause before utilizing an OR variant")]
    MissingPriorClause { clause: String },

    /// Join statement rendered without a selected join type
    #[error("Cannot build Join Clause without a selected join type")]
    NoJoinType,

    /// BETWEEN bounds of differing runtime kinds
    #[error("Start and End values provided to {clause} are of different types")]
    TypeMismatch { clause: String },

    /// Invalid argument value (BETWEEN value kind, LIKE escape length, empty IN, sort direction)
    #[error("{message}")]
    InvalidArgument { message: String },

    /// LIMIT/OFFSET below zero
    #[error("{message}")]
    OutOfRange { message: String },

    /// Statement refused because it would be unsafe to execute as written
    #[error("Dangerous SQL statement: {message}")]
    DangerousQuery { message: String },

    /// INSERT/UPDATE rendered with no field bindings
    #[error("No fields to update defined")]
    NoFields,
}

/// Convenience Result type for statement building operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unexpected-operator error, hinting at `<>` when the input was `!=`
    pub fn unexpected_operator(clause: impl Into<String>, operator: impl Into<String>) -> Self {
        let operator = operator.into();
        let hint = if operator == "!=" {
            "\nDid you mean `<>` (ANSI 'not equal to' operator) ?".to_string()
        } else {
            String::new()
        };
        Self::UnexpectedOperator {
            clause: clause.into(),
            operator,
            hint,
        }
    }

    /// Create an unexpected-function error
    pub fn unexpected_function(clause: impl Into<String>, function: impl Into<String>) -> Self {
        Self::UnexpectedFunction {
            clause: clause.into(),
            function: function.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new out-of-range error
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange {
            message: message.into(),
        }
    }

    /// Create a new dangerous-query refusal
    pub fn dangerous_query(message: impl Into<String>) -> Self {
        Self::DangerousQuery {
            message: message.into(),
        }
    }

    /// Create a new invalid column name error
    pub fn invalid_column(clause: impl Into<String>, column: impl Into<String>) -> Self {
        Self::InvalidColumnName {
            clause: clause.into(),
            column: column.into(),
        }
    }

    /// Create a new invalid alias error
    pub fn invalid_alias(context: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::InvalidAliasName {
            context: context.into(),
            alias: alias.into(),
        }
    }

    /// Create a new missing-prior-clause error
    pub fn missing_prior_clause(clause: impl Into<String>) -> Self {
        Self::MissingPriorClause {
            clause: clause.into(),
        }
    }
}
