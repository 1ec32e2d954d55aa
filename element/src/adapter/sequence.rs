//! Sequence adapter.
//!
//! Members are the index positions "0".."len-1" of the live list, plus the
//! symbolic `first` and `last`, which resolve against the length at access
//! time.

use super::is_numeric;
use crate::{Member, MemberAccess, MemberDescriptor};
use reach_core::{AccessError, AccessFault, ListRef, TypeDesc, Value};

pub(crate) const FIRST: &str = "first";
pub(crate) const LAST: &str = "last";

#[derive(Debug, Clone, Copy)]
enum Position {
    At(usize),
    First,
    Last,
}

impl Position {
    fn parse(name: &str) -> Option<Self> {
        match name {
            FIRST => Some(Position::First),
            LAST => Some(Position::Last),
            _ if is_numeric(name) => name.parse().ok().map(Position::At),
            _ => None,
        }
    }

    fn index(self, len: usize) -> Result<usize, AccessFault> {
        match self {
            Position::At(index) => Ok(index),
            Position::First | Position::Last if len == 0 => {
                Err(AccessError::IndexOutOfBounds { index: 0, len }.into_fault())
            }
            Position::First => Ok(0),
            Position::Last => Ok(len - 1),
        }
    }
}

/// Index members of a live list, in index order.
pub(crate) fn discover(list: &ListRef) -> Vec<Member> {
    let element = list.element_type();
    (0..list.len())
        .map(|index| template_at(&element, &index.to_string(), Position::At(index)))
        .collect()
}

/// Resolve `name` against a live list. Indexes past the end are absent.
pub(crate) fn find(list: &ListRef, name: &str) -> Option<Member> {
    let position = Position::parse(name)?;
    if let Position::At(index) = position {
        if index >= list.len() {
            return None;
        }
    }
    Some(template_at(&list.element_type(), name, position))
}

/// A member usable against any list of the given element type.
pub(crate) fn template(element: &TypeDesc, name: &str) -> Option<Member> {
    Position::parse(name).map(|position| template_at(element, name, position))
}

fn template_at(element: &TypeDesc, name: &str, position: Position) -> Member {
    Member::template(MemberDescriptor::new(
        name,
        element.clone(),
        TypeDesc::list(element.clone()),
        IndexAccess { position },
    ))
}

struct IndexAccess {
    position: Position,
}

impl IndexAccess {
    fn list<'v>(target: &'v Value) -> Result<&'v ListRef, AccessFault> {
        target
            .as_list()
            .ok_or_else(|| AccessError::type_mismatch("List", target.type_name()).into_fault())
    }
}

impl MemberAccess for IndexAccess {
    fn read(&self, target: &Value) -> Result<Value, AccessFault> {
        let list = Self::list(target)?;
        let index = self.position.index(list.len())?;
        list.get(index).map_err(AccessError::into_fault)
    }

    fn write(&self, target: &Value, value: Value) -> Result<(), AccessFault> {
        let list = Self::list(target)?;
        let index = self.position.index(list.len())?;
        list.set(index, value).map_err(AccessError::into_fault)
    }
}
