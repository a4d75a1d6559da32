//! Named parameter bindings for one statement

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::ident;
use crate::value::{Value, SQL_DATE_FORMAT};

const PARAMETER_NAME_LENGTH: usize = 10;
const PARAMETER_NAME_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Owns the mapping from named parameter to bound value for one statement.
///
/// Names are unique; binding a duplicate name is an error, never a silent
/// overwrite. When the caller supplies no name, a random 10-letter name is
/// generated and regenerated until it does not collide.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    entries: Vec<(String, Value)>,
    rng: StdRng,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a store whose anonymous-name generator is deterministic.
    ///
    /// Intended for tests that assert on generated parameter names.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            entries: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Bind `value` under `parameter`, generating a fresh name when `None`.
    ///
    /// Returns the name the value was stored under. Point-in-time values are
    /// normalized to their formatted literal string on the way in.
    pub fn bind(&mut self, parameter: Option<&str>, value: impl Into<Value>) -> Result<String> {
        let value = match value.into() {
            Value::DateTime(dt) => Value::String(dt.format(SQL_DATE_FORMAT).to_string()),
            other => other,
        };

        let name = match parameter {
            Some(name) => {
                if !ident::is_valid_sql_parameter(name) {
                    return Err(Error::InvalidParameterName {
                        parameter: name.to_string(),
                    });
                }
                if self.contains(name) {
                    return Err(Error::DuplicateParameter {
                        parameter: name.to_string(),
                    });
                }
                name.to_string()
            }
            None => loop {
                let candidate = self.generate_parameter_name();
                if !self.contains(&candidate) {
                    break candidate;
                }
            },
        };

        self.entries.push((name.clone(), value));
        Ok(name)
    }

    /// Whether a parameter with this name has already been bound
    pub fn contains(&self, parameter: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == parameter)
    }

    /// Read-only snapshot of the bindings, in insertion order
    pub fn bindings(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn generate_parameter_name(&mut self) -> String {
        (0..PARAMETER_NAME_LENGTH)
            .map(|_| {
                let idx = self.rng.gen_range(0..PARAMETER_NAME_CHARS.len());
                PARAMETER_NAME_CHARS[idx] as char
            })
            .collect()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
