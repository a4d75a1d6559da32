//! Closed enumerations of SQL comparison operators and aggregate functions

use std::fmt::{self, Display};

/// Type-safe SQL comparison operator
///
/// The set is closed: anything outside it is rejected at the call site with
/// an unexpected-operator error carrying the clause it was used in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    Different,
    LessThan,
    LessThanOrEqual,
    MoreThan,
    MoreThanOrEqual,
    Is,
    IsNot,
}

impl Operator {
    /// Parse an operator from its SQL spelling, `None` when unrecognized
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "=" => Some(Self::Equal),
            "<>" => Some(Self::Different),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqual),
            ">" => Some(Self::MoreThan),
            ">=" => Some(Self::MoreThanOrEqual),
            "IS" => Some(Self::Is),
            "IS NOT" => Some(Self::IsNot),
            _ => None,
        }
    }

    /// Get the SQL spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Different => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::MoreThan => ">",
            Self::MoreThanOrEqual => ">=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type-safe SQL aggregate function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Average,
    Count,
    Max,
    Min,
    Sum,
}

impl AggregateFunction {
    /// Parse an aggregate function from its SQL spelling, `None` when unrecognized
    pub fn parse(function: &str) -> Option<Self> {
        match function {
            "AVG" => Some(Self::Average),
            "COUNT" => Some(Self::Count),
            "MAX" => Some(Self::Max),
            "MIN" => Some(Self::Min),
            "SUM" => Some(Self::Sum),
            _ => None,
        }
    }

    /// Get the SQL spelling of the function
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Average => "AVG",
            Self::Count => "COUNT",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
        }
    }
}

impl Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
