//! Dotted member paths such as `customer.address` or `items.1`.
//!
//! A path member reports the leaf's declared type, tags and capabilities and
//! the first segment's declaring type. Every read or write walks the path
//! again through the live graph.

use crate::{ElementResult, Elements, Member, MemberAccess, MemberDescriptor};
use reach_core::{AccessError, AccessFault, TypeDesc, Value};

pub(crate) fn is_path(name: &str) -> bool {
    name.contains('.')
}

/// Resolve a dotted path against a live target, or against a type when no
/// target is given. Any missing segment makes the whole path absent.
pub(crate) fn resolve(
    elements: &Elements,
    path: &str,
    target: Option<&Value>,
    type_desc: &TypeDesc,
    deep: bool,
) -> ElementResult<Option<Member>> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut value = target.cloned();
    let mut current_type = type_desc.clone();
    let mut first: Option<Member> = None;
    let mut leaf: Option<Member> = None;

    for (i, segment) in segments.iter().enumerate() {
        let found = match &value {
            Some(v) if v.container_kind().is_some() => elements.member_of(v, segment, deep)?,
            Some(_) => None,
            None if current_type.is_container() => {
                elements.member_of_type(&current_type, segment, deep)?
            }
            None => None,
        };
        let Some(member) = found else {
            return Ok(None);
        };

        if i + 1 < segments.len() {
            // Follow the live value where there is one, else the declared type.
            let next = match &value {
                Some(v) if member.is_readable() => member.read_in(v)?,
                _ => Value::Null,
            };
            if next.is_null() {
                current_type = member.declared_type().clone();
                value = None;
            } else {
                current_type = next.type_desc();
                value = Some(next);
            }
        }

        if first.is_none() {
            first = Some(member.clone());
        }
        leaf = Some(member);
    }

    let (Some(first), Some(leaf)) = (first, leaf) else {
        return Ok(None);
    };

    let access = PathAccess {
        elements: elements.clone(),
        segments: segments.iter().map(|s| s.to_string()).collect(),
        deep,
    };
    let member = Member::template(
        MemberDescriptor::new(
            path,
            leaf.declared_type().clone(),
            first.declaring_type().clone(),
            access,
        )
        .readable(leaf.is_readable())
        .writable(leaf.is_writable())
        .with_tags(leaf.tags().to_vec()),
    );
    Ok(Some(match target {
        Some(target) => member.bind(target),
        None => member,
    }))
}

struct PathAccess {
    elements: Elements,
    segments: Vec<String>,
    deep: bool,
}

impl PathAccess {
    /// Walk to the leaf's owner and resolve the leaf against it.
    fn walk(&self, target: &Value) -> Result<(Value, Member), AccessFault> {
        let (last, init) = self
            .segments
            .split_last()
            .ok_or_else(|| AccessError::failed("empty path").into_fault())?;

        let mut current = target.clone();
        for segment in init {
            let member = self.segment(&current, segment)?;
            current = member.read_in(&current)?;
            if current.is_null() {
                return Err(AccessError::failed(format!("'{}' is null", segment)).into_fault());
            }
        }
        let leaf = self.segment(&current, last)?;
        Ok((current, leaf))
    }

    fn segment(&self, owner: &Value, name: &str) -> Result<Member, AccessFault> {
        self.elements
            .member_of(owner, name, self.deep)?
            .ok_or_else(|| {
                AccessError::failed(format!("no member '{}' on {}", name, owner.type_desc()))
                    .into_fault()
            })
    }
}

impl MemberAccess for PathAccess {
    fn read(&self, target: &Value) -> Result<Value, AccessFault> {
        let (owner, leaf) = self.walk(target)?;
        Ok(leaf.read_in(&owner)?)
    }

    fn write(&self, target: &Value, value: Value) -> Result<(), AccessFault> {
        let (owner, leaf) = self.walk(target)?;
        Ok(leaf.write_in(&owner, value)?)
    }
}
