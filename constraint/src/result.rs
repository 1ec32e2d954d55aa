//! Validation results.

use reach_core::{Tag, TypeDesc, Value};
use reach_element::Member;
use std::collections::BTreeMap;
use std::fmt;

/// A member whose value violated one or more constraints.
#[derive(Debug, Clone)]
pub struct InvalidElement {
    member: Member,
    path: String,
    invalid_value: Value,
    /// Violated tags by tag name.
    violated: BTreeMap<String, Tag>,
}

impl InvalidElement {
    pub fn new(member: Member, invalid_value: Value, violated: impl IntoIterator<Item = Tag>) -> Self {
        let path = member.name().to_string();
        let mut element = Self {
            member,
            path,
            invalid_value,
            violated: BTreeMap::new(),
        };
        for tag in violated {
            element.violate(tag);
        }
        element
    }

    fn violate(&mut self, tag: Tag) {
        self.violated.entry(tag.name().to_string()).or_insert(tag);
    }

    /// Re-root under `prefix`.
    pub(crate) fn prefixed(mut self, prefix: &str) -> Self {
        self.path = format!("{}.{}", prefix, self.path);
        self
    }

    pub fn member(&self) -> &Member {
        &self.member
    }

    pub fn name(&self) -> &str {
        self.member.name()
    }

    /// Dotted position in the validated graph.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn declared_type(&self) -> &TypeDesc {
        self.member.declared_type()
    }

    pub fn declaring_type(&self) -> &TypeDesc {
        self.member.declaring_type()
    }

    pub fn is_readable(&self) -> bool {
        self.member.is_readable()
    }

    pub fn is_writable(&self) -> bool {
        self.member.is_writable()
    }

    pub fn tags(&self) -> &[Tag] {
        self.member.tags()
    }

    pub fn invalid_value(&self) -> &Value {
        &self.invalid_value
    }

    pub fn violated_constraints(&self) -> impl Iterator<Item = &Tag> {
        self.violated.values()
    }

    pub fn violated_constraint(&self, tag_name: &str) -> Option<&Tag> {
        self.violated.get(tag_name)
    }

    pub fn is_constraint_violated(&self, tag_name: &str) -> bool {
        self.violated.contains_key(tag_name)
    }
}

impl fmt::Display for InvalidElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.violated.keys().map(String::as_str).collect();
        write!(f, "{}: violates @{}", self.path, names.join(", @"))
    }
}

/// Everything found invalid in one validation run, keyed by path.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    target: Value,
    invalid: BTreeMap<String, InvalidElement>,
}

impl ValidationResult {
    pub(crate) fn new(target: Value) -> Self {
        Self {
            target,
            invalid: BTreeMap::new(),
        }
    }

    /// Record an element. Violations at an already recorded path are merged.
    pub(crate) fn insert(&mut self, element: InvalidElement) {
        match self.invalid.get_mut(element.path()) {
            Some(existing) => {
                for tag in element.violated.into_values() {
                    existing.violate(tag);
                }
            }
            None => {
                self.invalid.insert(element.path.clone(), element);
            }
        }
    }

    pub(crate) fn into_elements(self) -> Vec<InvalidElement> {
        self.invalid.into_values().collect()
    }

    pub fn target(&self) -> &Value {
        &self.target
    }

    pub fn is_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn invalid_element(&self, path: &str) -> Option<&InvalidElement> {
        self.invalid.get(path)
    }

    /// Invalid elements in path order.
    pub fn invalid_elements(&self) -> impl Iterator<Item = &InvalidElement> {
        self.invalid.values()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.invalid.keys().map(String::as_str).collect()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "{} is valid", self.target.type_desc());
        }
        writeln!(f, "{} has {} invalid element(s):", self.target.type_desc(), self.len())?;
        for element in self.invalid.values() {
            writeln!(f, "  {}", element)?;
        }
        Ok(())
    }
}
