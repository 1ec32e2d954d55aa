//! Entry point for member resolution.

use crate::{adapter, Copier, ElementError, ElementResult, Member, MemberCache, Selector};
use reach_core::{TypeDesc, Value};
use reach_registry::Registry;
use std::sync::Arc;

/// Resolves members against one registry.
///
/// Cloning is cheap; clones share the registry and the member cache.
#[derive(Debug, Clone)]
pub struct Elements {
    registry: Arc<Registry>,
    cache: Arc<MemberCache>,
}

impl Elements {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            cache: Arc::new(MemberCache::new()),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn cache(&self) -> &MemberCache {
        &self.cache
    }

    /// Start a member query.
    pub fn select(&self) -> Selector {
        Selector::new(self.clone())
    }

    /// Start a copy between two containers.
    pub fn copier(&self) -> Copier {
        Copier::new(self.clone())
    }

    /// Unbound members of a container type, in discovery order.
    ///
    /// Instance-level kinds (lists, maps, property stores, cursors) have no
    /// type-level members.
    pub fn members_of_type(&self, type_desc: &TypeDesc, deep: bool) -> ElementResult<Vec<Member>> {
        match type_desc.container_kind() {
            Some(kind) if kind.is_type_level() => Ok(self
                .cache
                .members(&self.registry, type_desc, deep)?
                .all()
                .to_vec()),
            Some(_) => Ok(Vec::new()),
            None => Err(ElementError::not_a_container(type_desc.to_string())),
        }
    }

    /// One unbound member of a container type.
    pub fn member_of_type(
        &self,
        type_desc: &TypeDesc,
        name: &str,
        deep: bool,
    ) -> ElementResult<Option<Member>> {
        match type_desc.container_kind() {
            Some(kind) if kind.is_type_level() => {
                self.cache.member(&self.registry, type_desc, name, deep)
            }
            Some(_) => Ok(adapter::type_template(type_desc, name)),
            None => Err(ElementError::not_a_container(type_desc.to_string())),
        }
    }

    /// Members of a live container, bound to it.
    pub fn members_of(&self, target: &Value, deep: bool) -> ElementResult<Vec<Member>> {
        let members = match target.container_kind() {
            Some(kind) if kind.is_type_level() => self.members_of_type(&target.type_desc(), deep)?,
            Some(_) => adapter::discover_instance(target)?,
            None => return Err(ElementError::not_a_container(target.type_name())),
        };
        Ok(members.iter().map(|m| m.bind(target)).collect())
    }

    /// One member of a live container, bound to it.
    pub fn member_of(&self, target: &Value, name: &str, deep: bool) -> ElementResult<Option<Member>> {
        let member = match target.container_kind() {
            Some(kind) if kind.is_type_level() => {
                self.member_of_type(&target.type_desc(), name, deep)?
            }
            Some(_) => adapter::find_instance(target, name)?,
            None => return Err(ElementError::not_a_container(target.type_name())),
        };
        Ok(member.map(|m| m.bind(target)))
    }
}
