//! Composable member predicates.

use crate::Member;
use reach_core::TypeDesc;
use reach_registry::Registry;
use std::fmt;
use std::sync::Arc;

/// A shareable test over members.
#[derive(Clone)]
pub struct MemberPredicate(Arc<dyn Fn(&Member) -> bool + Send + Sync>);

impl MemberPredicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Member) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn test(&self, member: &Member) -> bool {
        (self.0)(member)
    }

    pub fn and(self, other: MemberPredicate) -> Self {
        Self::new(move |m| self.test(m) && other.test(m))
    }

    pub fn or(self, other: MemberPredicate) -> Self {
        Self::new(move |m| self.test(m) || other.test(m))
    }

    pub fn negate(self) -> Self {
        Self::new(move |m| !self.test(m))
    }
}

impl fmt::Debug for MemberPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MemberPredicate(..)")
    }
}

pub fn readable() -> MemberPredicate {
    MemberPredicate::new(Member::is_readable)
}

pub fn writable() -> MemberPredicate {
    MemberPredicate::new(Member::is_writable)
}

/// Members carrying at least one tag.
pub fn tagged() -> MemberPredicate {
    MemberPredicate::new(|m| !m.tags().is_empty())
}

pub fn untagged() -> MemberPredicate {
    tagged().negate()
}

pub fn tagged_with(tag_name: impl Into<String>) -> MemberPredicate {
    let tag_name = tag_name.into();
    MemberPredicate::new(move |m| m.has_tag(&tag_name))
}

pub fn named(name: impl Into<String>) -> MemberPredicate {
    let name = name.into();
    MemberPredicate::new(move |m| m.name() == name)
}

/// Members whose declared type is exactly `type_desc`.
pub fn of_type(type_desc: TypeDesc) -> MemberPredicate {
    MemberPredicate::new(move |m| *m.declared_type() == type_desc)
}

/// Members whose declared type can be stored in a slot of `type_desc`.
pub fn assignable_to(registry: Arc<Registry>, type_desc: TypeDesc) -> MemberPredicate {
    MemberPredicate::new(move |m| registry.is_assignable(&type_desc, m.declared_type()))
}

pub fn specific() -> MemberPredicate {
    MemberPredicate::new(Member::is_specific)
}

pub fn non_specific() -> MemberPredicate {
    specific().negate()
}
