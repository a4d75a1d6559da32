//! sqlwright - a validation-first, fluent SQL statement builder
//!
//! This crate assembles SELECT/INSERT/UPDATE/DELETE statements through
//! validated, composable operations, producing a parameterized SQL string
//! plus a named-parameter binding map for a prepared-statement execution
//! layer. It never touches a database connection and never executes
//! anything: values are always sent as bound parameters, never interpolated
//! into the statement text.
//!
//! ```
//! use sqlwright::{Select, Statement};
//!
//! let query = Select::new("posts")?
//!     .where_("author", "=", "x", Some("a"))?
//!     .where_or("author", "=", "y", Some("b"))?;
//!
//! assert_eq!(
//!     query.to_sql()?,
//!     "SELECT * FROM posts WHERE (author = :a OR author = :b)"
//! );
//! # Ok::<(), sqlwright::Error>(())
//! ```

pub mod builder;
pub mod clause;
pub mod error;
pub mod ident;
pub mod operator;
pub mod param;
pub mod reserved;
pub mod value;

// Re-export main types
pub use builder::{Delete, Insert, JoinType, Select, SelectJoin, Statement, Update};
pub use clause::ClauseBuilder;
pub use error::{Error, Result};
pub use operator::{AggregateFunction, Operator};
pub use param::ParameterStore;
pub use value::{Value, SQL_DATE_FORMAT};
