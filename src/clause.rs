//! WHERE / HAVING clause composition engine
//!
//! A [`ClauseBuilder`] owns one ordered list of rendered predicate fragments
//! and the OR-merge algorithm over it. Statement assemblers embed one builder
//! per clause kind (WHERE, HAVING) and join the fragments with ` AND ` at
//! render time, so ORing is strictly local: it merges with the immediately
//! preceding fragment and never reaches across already-ANDed groups.

use std::mem::discriminant;

use crate::error::{Error, Result};
use crate::ident;
use crate::operator::{AggregateFunction, Operator};
use crate::param::ParameterStore;
use crate::value::{Value, SQL_DATE_FORMAT};

/// Fragment list for one logical clause (WHERE or HAVING)
#[derive(Debug, Clone)]
pub struct ClauseBuilder {
    label: &'static str,
    fragments: Vec<String>,
}

impl ClauseBuilder {
    /// Create an empty builder labelled with the clause it backs.
    ///
    /// The label only feeds error messages (`WHERE`, `HAVING`).
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            fragments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Rendered fragments, in insertion/merge order
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Join all fragments with ` AND `
    pub fn render(&self) -> String {
        self.fragments.join(" AND ")
    }

    /// Merge `fragment` into the most recent one as `(previous OR fragment)`.
    ///
    /// Fails when there is no previous fragment to merge into.
    pub fn or_merge(&mut self, fragment: String) -> Result<()> {
        let previous = self
            .fragments
            .pop()
            .ok_or_else(|| Error::missing_prior_clause(self.label))?;
        self.fragments.push(format!("({previous} OR {fragment})"));
        Ok(())
    }

    /// Append a `column op :parameter` predicate, binding `value`.
    pub fn comparison(
        &mut self,
        store: &mut ParameterStore,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<()> {
        let fragment = self.build_comparison(store, column, operator, value, parameter)?;
        self.fragments.push(fragment);
        Ok(())
    }

    /// OR-merge a `column op :parameter` predicate with the previous fragment.
    pub fn or_comparison(
        &mut self,
        store: &mut ParameterStore,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<()> {
        if self.is_empty() {
            return Err(Error::missing_prior_clause(self.label));
        }
        let fragment = self.build_comparison(store, column, operator, value, parameter)?;
        self.or_merge(fragment)
    }

    /// Append a `column IS [NOT ]NULL` predicate.
    pub fn is_null(&mut self, column: &str, negated: bool) -> Result<()> {
        let fragment = self.build_is_null(column, negated)?;
        self.fragments.push(fragment);
        Ok(())
    }

    /// OR-merge a `column IS [NOT ]NULL` predicate with the previous fragment.
    pub fn or_is_null(&mut self, column: &str, negated: bool) -> Result<()> {
        if self.is_empty() {
            return Err(Error::missing_prior_clause(self.label));
        }
        let fragment = self.build_is_null(column, negated)?;
        self.or_merge(fragment)
    }

    /// Append a `column [NOT ]LIKE :parameter [ESCAPE 'c']` predicate,
    /// binding the pattern.
    pub fn like(
        &mut self,
        store: &mut ParameterStore,
        column: &str,
        pattern: &str,
        escape_char: Option<&str>,
        parameter: Option<&str>,
        negated: bool,
    ) -> Result<()> {
        let negation = if negated { "NOT " } else { "" };
        let clause = format!("{} {}LIKE", self.label, negation);

        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column(clause, column));
        }

        let parameter = store.bind(parameter, pattern)?;
        let escape = Self::escape(escape_char)?;

        self.fragments
            .push(format!("{column} {negation}LIKE :{parameter}{escape}"));
        Ok(())
    }

    /// Append a `column [NOT ]BETWEEN start AND end` predicate.
    ///
    /// Both bounds must be of the same kind, and that kind must be integer,
    /// float or date/time. Bounds are rendered as inline literals; date/time
    /// bounds are quoted in the fixed literal format.
    pub fn between(
        &mut self,
        column: &str,
        start: impl Into<Value>,
        end: impl Into<Value>,
        negated: bool,
    ) -> Result<()> {
        let negation = if negated { "NOT " } else { "" };
        let clause = format!("{} {}BETWEEN", self.label, negation);

        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column(clause, column));
        }

        let start = start.into();
        let end = end.into();

        if discriminant(&start) != discriminant(&end) {
            return Err(Error::TypeMismatch { clause });
        }

        let start = Self::range_bound(&start, &clause)?;
        let end = Self::range_bound(&end, &clause)?;

        self.fragments
            .push(format!("{column} {negation}BETWEEN {start} AND {end}"));
        Ok(())
    }

    /// Append a `column [NOT ]IN (:a, :b, ...)` predicate, binding every
    /// element as an anonymous parameter.
    pub fn in_list(
        &mut self,
        store: &mut ParameterStore,
        column: &str,
        values: Vec<Value>,
        negated: bool,
    ) -> Result<()> {
        let negation = if negated { "NOT " } else { "" };
        let clause = format!("{} {}IN", self.label, negation);

        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column(clause, column));
        }

        if values.is_empty() {
            return Err(Error::invalid_argument(format!(
                "{clause} clause requires at least one value"
            )));
        }

        let mut placeholders = Vec::with_capacity(values.len());
        for value in values {
            let parameter = store.bind(None, value)?;
            placeholders.push(format!(":{parameter}"));
        }

        self.fragments.push(format!(
            "{column} {negation}IN ({})",
            placeholders.join(", ")
        ));
        Ok(())
    }

    /// Append a `FUNC(column) op value` predicate with the integer inlined
    /// (the HAVING form).
    pub fn aggregate_comparison(
        &mut self,
        column: &str,
        function: &str,
        operator: &str,
        value: i64,
    ) -> Result<()> {
        let fragment = self.build_aggregate_comparison(column, function, operator, value)?;
        self.fragments.push(fragment);
        Ok(())
    }

    /// OR-merge a `FUNC(column) op value` predicate with the previous fragment.
    pub fn or_aggregate_comparison(
        &mut self,
        column: &str,
        function: &str,
        operator: &str,
        value: i64,
    ) -> Result<()> {
        if self.is_empty() {
            return Err(Error::missing_prior_clause(self.label));
        }
        let fragment = self.build_aggregate_comparison(column, function, operator, value)?;
        self.or_merge(fragment)
    }

    fn build_comparison(
        &self,
        store: &mut ParameterStore,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
        parameter: Option<&str>,
    ) -> Result<String> {
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column(self.label, column));
        }

        let operator = Operator::parse(operator)
            .ok_or_else(|| Error::unexpected_operator(self.label, operator))?;

        let parameter = store.bind(parameter, value)?;

        Ok(format!("{column} {operator} :{parameter}"))
    }

    fn build_is_null(&self, column: &str, negated: bool) -> Result<String> {
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column(self.label, column));
        }

        let negation = if negated { "NOT " } else { "" };
        Ok(format!("{column} IS {negation}NULL"))
    }

    fn build_aggregate_comparison(
        &self,
        column: &str,
        function: &str,
        operator: &str,
        value: i64,
    ) -> Result<String> {
        if !ident::is_valid_sql_name(column) {
            return Err(Error::invalid_column(self.label, column));
        }

        let function = AggregateFunction::parse(function)
            .ok_or_else(|| Error::unexpected_function(self.label, function))?;

        let operator = Operator::parse(operator)
            .ok_or_else(|| Error::unexpected_operator(self.label, operator))?;

        Ok(format!("{function}({column}) {operator} {value}"))
    }

    fn escape(escape_char: Option<&str>) -> Result<String> {
        match escape_char {
            None => Ok(String::new()),
            Some(c) if c.chars().count() == 1 => Ok(format!(" ESCAPE '{c}'")),
            Some(_) => Err(Error::invalid_argument(
                "Escape character for LIKE clause must be of length 1",
            )),
        }
    }

    fn range_bound(value: &Value, clause: &str) -> Result<String> {
        match value {
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::DateTime(dt) => Ok(format!("'{}'", dt.format(SQL_DATE_FORMAT))),
            other => Err(Error::invalid_argument(format!(
                "Values for {clause} clause must be an integer, float or a date/time value. \
                 Input was of type: {}",
                other.type_name()
            ))),
        }
    }
}
