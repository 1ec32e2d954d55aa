use crate::{ConstraintError, ConstraintResult, Validator, Verdict};
use reach_core::{Tag, Value};
use reach_registry::builtin;
use regex_lite::Regex;

/// Bounds the length of a string (in characters) or the size of a collection.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    min: i64,
    max: i64,
    trim: bool,
}

impl Length {
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            trim: false,
        }
    }

    pub fn from_tag(tag: &Tag) -> Self {
        Self {
            min: tag.int("min").unwrap_or(0),
            max: tag.int("max").unwrap_or(i64::MAX),
            trim: tag.bool("trim").unwrap_or(false),
        }
    }

    /// Ignore surrounding whitespace in strings.
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }
}

impl Validator for Length {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        let len = match value {
            Value::Null => return Ok(Verdict::Valid),
            Value::String(s) if self.trim => s.trim().chars().count(),
            Value::String(s) => s.chars().count(),
            Value::List(list) => list.len(),
            Value::Map(map) => map.len(),
            Value::Properties(properties) => properties.len(),
            other => {
                return Err(ConstraintError::unsupported_value(
                    builtin::LENGTH,
                    other.type_name(),
                ))
            }
        };
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        Ok((len >= self.min && len <= self.max).into())
    }
}

/// The whole string must match a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> ConstraintResult<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| ConstraintError::invalid_pattern(pattern, e.to_string()))?;
        Ok(Self { regex })
    }

    pub fn from_tag(tag: &Tag) -> ConstraintResult<Self> {
        let pattern = tag
            .str("regex")
            .ok_or_else(|| ConstraintError::missing_param(tag.name(), "regex"))?;
        Self::new(pattern)
    }
}

impl Validator for Pattern {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        match value {
            Value::Null => Ok(Verdict::Valid),
            Value::String(s) => Ok(self.regex.is_match(s).into()),
            other => Err(ConstraintError::unsupported_value(
                builtin::PATTERN,
                other.type_name(),
            )),
        }
    }
}
