use super::required_number;
use crate::{ConstraintError, ConstraintResult, Validator, Verdict};
use reach_core::{Tag, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Min,
    Max,
}

impl BoundKind {
    fn name(self) -> &'static str {
        match self {
            BoundKind::Min => reach_registry::builtin::MIN,
            BoundKind::Max => reach_registry::builtin::MAX,
        }
    }
}

/// A numeric lower or upper bound. Values within `delta` of the limit count
/// as equal to it.
#[derive(Debug, Clone, Copy)]
pub struct Bound {
    kind: BoundKind,
    limit: f64,
    delta: f64,
    inclusive: bool,
}

impl Bound {
    pub fn new(kind: BoundKind, limit: f64) -> Self {
        Self {
            kind,
            limit,
            delta: 0.0,
            inclusive: true,
        }
    }

    pub fn from_tag(kind: BoundKind, tag: &Tag) -> ConstraintResult<Self> {
        Ok(Self {
            kind,
            limit: required_number(tag, "value")?,
            delta: tag.number("delta").unwrap_or(0.0).abs(),
            inclusive: tag.bool("inclusive").unwrap_or(true),
        })
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta.abs();
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self
    }

    fn admits(&self, n: f64) -> bool {
        if (n - self.limit).abs() <= self.delta {
            return self.inclusive;
        }
        match self.kind {
            BoundKind::Min => n > self.limit,
            BoundKind::Max => n < self.limit,
        }
    }
}

impl Validator for Bound {
    fn check(&self, value: &Value) -> ConstraintResult<Verdict> {
        if value.is_null() {
            return Ok(Verdict::Valid);
        }
        let n = value
            .as_number()
            .ok_or_else(|| ConstraintError::unsupported_value(self.kind.name(), value.type_name()))?;
        Ok(self.admits(n).into())
    }
}
