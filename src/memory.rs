use crate::error_handling::*;
use crate::operating::Value;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// Read-only view of the variables an expression may refer to.
pub trait Environment {
    fn lookup(&self, identifier: &str) -> Option<Value>;
}

impl Environment for HashMap<String, Value> {
    fn lookup(&self, identifier: &str) -> Option<Value> {
        self.get(identifier).copied()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, identifier: &str) -> Option<Value> {
        (**self).lookup(identifier)
    }
}

/// The variables of one session, kept ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, identifier: impl Into<String>, value: Value) {
        self.values.insert(identifier.into(), value);
    }

    pub fn remove(&mut self, identifier: &str) -> Option<Value> {
        self.values.remove(identifier)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Writes every variable as a `name = value` line.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_string()).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "could not write variables");
            CalcError::io(path, e)
        })?;
        tracing::info!(path = %path.display(), count = self.len(), "wrote variables");
        Ok(())
    }
}

impl Environment for Variables {
    fn lookup(&self, identifier: &str) -> Option<Value> {
        self.values.get(identifier).copied()
    }
}

impl fmt::Display for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}
