//! Container adapters.
//!
//! Dispatch is by [`ContainerKind`]. Objects and tags are discovered per type
//! through the registry and memoized by the member cache; the other kinds
//! depend on the live instance and are discovered on every request.

mod cursor;
mod map;
mod object;
mod sequence;
mod tag;

use crate::{ElementError, ElementResult, Member};
use reach_core::{ContainerKind, TypeDesc, Value};
use reach_registry::Registry;
use regex_lite::Regex;
use std::sync::OnceLock;

/// Returns true if `name` is a plain decimal index.
pub(crate) fn is_numeric(name: &str) -> bool {
    static NUMERIC: OnceLock<Option<Regex>> = OnceLock::new();
    NUMERIC
        .get_or_init(|| Regex::new(r"^\d+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}

/// Type-level discovery for objects and tags.
pub(crate) fn discover_type(
    registry: &Registry,
    type_desc: &TypeDesc,
    deep: bool,
) -> ElementResult<Vec<Member>> {
    match type_desc {
        TypeDesc::Object(name) => object::discover(registry, name, deep),
        TypeDesc::Tag(name) => tag::discover(registry, name),
        other => Err(ElementError::not_a_container(other.to_string())),
    }
}

/// Unbound members of an instance-level container, in discovery order.
pub(crate) fn discover_instance(target: &Value) -> ElementResult<Vec<Member>> {
    match target {
        Value::List(list) => Ok(sequence::discover(list)),
        Value::Map(map) => Ok(map::discover_map(map)),
        Value::Properties(properties) => Ok(map::discover_properties(properties)),
        Value::Cursor(cursor) => cursor::discover(cursor),
        other => Err(ElementError::not_a_container(other.type_name())),
    }
}

/// Resolve one unbound member of an instance-level container.
pub(crate) fn find_instance(target: &Value, name: &str) -> ElementResult<Option<Member>> {
    match target {
        Value::List(list) => Ok(sequence::find(list, name)),
        Value::Map(map) => Ok(Some(map::map_template(&map.value_type(), name))),
        Value::Properties(_) => Ok(Some(map::property_template(name))),
        Value::Cursor(_) => Ok(Some(cursor::template(name))),
        other => Err(ElementError::not_a_container(other.type_name())),
    }
}

/// A template for an instance-level container type, usable against any
/// instance of that type.
pub(crate) fn type_template(type_desc: &TypeDesc, name: &str) -> Option<Member> {
    match type_desc.container_kind()? {
        ContainerKind::Sequence => match type_desc {
            TypeDesc::List(element) => sequence::template(element, name),
            _ => None,
        },
        ContainerKind::Map => match type_desc {
            TypeDesc::Map(value) => Some(map::map_template(value, name)),
            _ => None,
        },
        ContainerKind::Properties => Some(map::property_template(name)),
        ContainerKind::Cursor => Some(cursor::template(name)),
        ContainerKind::Object | ContainerKind::Tag => None,
    }
}
