//! Metadata tag instances.
//!
//! A tag is a declarative marker attached to a member or a type. Its
//! parameters are immutable once built; the registry fills defaults and
//! checks parameter types when a tag is declared on a definition.

use crate::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct TagInner {
    name: String,
    params: BTreeMap<String, Value>,
}

/// An instance of a tag type with its parameter values.
#[derive(Clone, PartialEq)]
pub struct Tag(Arc<TagInner>);

impl Tag {
    /// Create a tag instance with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(TagInner {
            name: name.into(),
            params: BTreeMap::new(),
        }))
    }

    /// Set a parameter.
    pub fn with(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.0)
            .params
            .insert(param.into(), value.into());
        self
    }

    /// The tag type name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Get a parameter value.
    pub fn get(&self, param: &str) -> Option<&Value> {
        self.0.params.get(param)
    }

    /// Returns true if the parameter is set.
    pub fn has(&self, param: &str) -> bool {
        self.0.params.contains_key(param)
    }

    /// All parameters, ordered by name.
    pub fn params(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Numeric parameter (Int or Float).
    pub fn number(&self, param: &str) -> Option<f64> {
        self.get(param).and_then(Value::as_number)
    }

    /// Integer parameter.
    pub fn int(&self, param: &str) -> Option<i64> {
        self.get(param).and_then(Value::as_int)
    }

    /// Boolean parameter.
    pub fn bool(&self, param: &str) -> Option<bool> {
        self.get(param).and_then(Value::as_bool)
    }

    /// String parameter.
    pub fn str(&self, param: &str) -> Option<&str> {
        self.get(param).and_then(Value::as_str)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0.name)?;
        if !self.0.params.is_empty() {
            f.debug_map().entries(self.0.params.iter()).finish()?;
        }
        Ok(())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0.name)?;
        if !self.0.params.is_empty() {
            write!(f, "(")?;
            for (i, (name, value)) in self.0.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} = {}", name, value)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
