//! Member queries.

use crate::predicate::{self, MemberPredicate};
use crate::{path, ElementError, ElementResult, Elements, Member};
use reach_core::{TypeDesc, Value};

/// A query narrowing members by predicates, all of which must hold.
///
/// Inherited members are only visited after [`Selector::deep`].
#[derive(Debug, Clone)]
pub struct Selector {
    elements: Elements,
    predicates: Vec<MemberPredicate>,
    deep: bool,
}

impl Selector {
    pub(crate) fn new(elements: Elements) -> Self {
        Self {
            elements,
            predicates: Vec::new(),
            deep: false,
        }
    }

    /// Add a predicate.
    pub fn matching(mut self, predicate: MemberPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Add a custom predicate.
    pub fn filter<F>(self, f: F) -> Self
    where
        F: Fn(&Member) -> bool + Send + Sync + 'static,
    {
        self.matching(MemberPredicate::new(f))
    }

    pub fn readable(self) -> Self {
        self.matching(predicate::readable())
    }

    pub fn writable(self) -> Self {
        self.matching(predicate::writable())
    }

    pub fn tagged(self) -> Self {
        self.matching(predicate::tagged())
    }

    pub fn untagged(self) -> Self {
        self.matching(predicate::untagged())
    }

    pub fn tagged_with(self, tag_name: impl Into<String>) -> Self {
        self.matching(predicate::tagged_with(tag_name))
    }

    pub fn of_type(self, type_desc: TypeDesc) -> Self {
        self.matching(predicate::of_type(type_desc))
    }

    pub fn assignable_to(self, type_desc: TypeDesc) -> Self {
        let registry = self.elements.registry().clone();
        self.matching(predicate::assignable_to(registry, type_desc))
    }

    pub fn specific(self) -> Self {
        self.matching(predicate::specific())
    }

    pub fn non_specific(self) -> Self {
        self.matching(predicate::non_specific())
    }

    /// Include members inherited from ancestor types.
    pub fn deep(mut self) -> Self {
        self.deep = true;
        self
    }

    fn accepts(&self, member: &Member) -> bool {
        self.predicates.iter().all(|p| p.test(member))
    }

    /// The member of `target` with the given name or dotted path.
    pub fn find(&self, name: &str, target: &Value) -> ElementResult<Option<Member>> {
        let found = if path::is_path(name) {
            path::resolve(&self.elements, name, Some(target), &target.type_desc(), self.deep)?
        } else {
            self.elements.member_of(target, name, self.deep)?
        };
        Ok(found.filter(|m| self.accepts(m)))
    }

    /// The unbound member of a type with the given name or dotted path.
    pub fn find_in_type(&self, name: &str, type_desc: &TypeDesc) -> ElementResult<Option<Member>> {
        let found = if path::is_path(name) {
            path::resolve(&self.elements, name, None, type_desc, self.deep)?
        } else {
            self.elements.member_of_type(type_desc, name, self.deep)?
        };
        Ok(found.filter(|m| self.accepts(m)))
    }

    /// Every matching member of `target`, in discovery order.
    pub fn find_all(&self, target: &Value) -> ElementResult<Vec<Member>> {
        let members = self.elements.members_of(target, self.deep)?;
        Ok(members.into_iter().filter(|m| self.accepts(m)).collect())
    }

    /// Every matching unbound member of a type, in discovery order.
    pub fn find_all_in_type(&self, type_desc: &TypeDesc) -> ElementResult<Vec<Member>> {
        let members = self.elements.members_of_type(type_desc, self.deep)?;
        Ok(members.into_iter().filter(|m| self.accepts(m)).collect())
    }

    /// The single matching member of `target`.
    ///
    /// Fails with [`ElementError::Ambiguous`] when more than one member matches.
    pub fn find_one(&self, target: &Value) -> ElementResult<Option<Member>> {
        let mut members = self.find_all(target)?;
        match members.len() {
            0 => Ok(None),
            1 => Ok(members.pop()),
            count => Err(ElementError::Ambiguous { count }),
        }
    }
}
