//! Member cache.
//!
//! Templates for objects and tags are discovered once per type and kept for
//! the lifetime of the cache. Concurrent first lookups may both discover;
//! the first insert wins and later ones adopt it.

use crate::{adapter, ElementResult, Member};
use parking_lot::RwLock;
use reach_core::TypeDesc;
use reach_registry::Registry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The discovered members of one type, in discovery order.
#[derive(Debug)]
pub struct TypeMembers {
    members: Vec<Member>,
    by_name: HashMap<String, usize>,
}

impl TypeMembers {
    fn new(members: Vec<Member>) -> Self {
        let by_name = members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name().to_string(), i))
            .collect();
        Self { members, by_name }
    }

    pub fn all(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.by_name.get(name).map(|&i| &self.members[i])
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Per-type memoization of member templates.
#[derive(Debug, Default)]
pub struct MemberCache {
    entries: RwLock<HashMap<(TypeDesc, bool), Arc<TypeMembers>>>,
}

impl MemberCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// All member templates of a type.
    pub fn members(
        &self,
        registry: &Registry,
        type_desc: &TypeDesc,
        deep: bool,
    ) -> ElementResult<Arc<TypeMembers>> {
        let key = (type_desc.clone(), deep);
        if let Some(found) = self.entries.read().get(&key) {
            return Ok(Arc::clone(found));
        }

        // Discover outside the lock; a racing insert for the same key wins.
        let discovered = Arc::new(TypeMembers::new(adapter::discover_type(
            registry, type_desc, deep,
        )?));
        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert_with(|| {
            debug!(type_desc = %type_desc, deep, members = discovered.len(), "cached members");
            Arc::clone(&discovered)
        });
        Ok(Arc::clone(entry))
    }

    /// One member template of a type by name.
    pub fn member(
        &self,
        registry: &Registry,
        type_desc: &TypeDesc,
        name: &str,
        deep: bool,
    ) -> ElementResult<Option<Member>> {
        Ok(self.members(registry, type_desc, deep)?.get(name).cloned())
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
