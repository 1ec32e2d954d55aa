//! Structured-object adapter.
//!
//! One member per logical name. A name's read path is its accessor, else
//! its field; its write path is its mutator, else its field unless the
//! field is read-only.

use crate::{ElementError, ElementResult, Member, MemberAccess, MemberDescriptor};
use reach_core::{AccessError, AccessFault, Object, ObjectRef, Tag, TypeDesc, Value};
use reach_registry::{Getter, Registry, Setter, TypeDef};
use std::collections::HashSet;
use std::sync::Arc;

/// Discover the members of a registered type, optionally including inherited ones.
///
/// Each capability of a name comes from its nearest declaration along the
/// lineage, so a subtype mutator still pairs with an inherited accessor.
pub(crate) fn discover(registry: &Registry, type_name: &str, deep: bool) -> ElementResult<Vec<Member>> {
    let type_def = registry
        .get_type_by_name(type_name)
        .ok_or_else(|| ElementError::unknown_type(type_name))?;
    let lineage = if deep {
        registry.lineage(type_name)
    } else {
        vec![type_def]
    };

    let mut seen = HashSet::new();
    let mut members = Vec::new();
    for def in &lineage {
        for name in def.member_names() {
            if seen.insert(name) {
                members.push(Member::template(merge(&lineage, name)));
            }
        }
    }
    Ok(members)
}

/// The nearest definition in `lineage` for which `pick` finds a declaration.
fn nearest<'a, T>(
    lineage: &[&'a Arc<TypeDef>],
    pick: impl Fn(&'a TypeDef) -> Option<&'a T>,
) -> Option<(usize, &'a TypeDef, &'a T)> {
    lineage.iter().copied().enumerate().find_map(|(depth, def)| {
        let def: &'a TypeDef = def;
        pick(def).map(|decl| (depth, def, decl))
    })
}

fn merge(lineage: &[&Arc<TypeDef>], name: &str) -> MemberDescriptor {
    let field_at = nearest(lineage, |d| d.field(name));
    let accessor_at = nearest(lineage, |d| d.accessor(name));
    let mutator_at = nearest(lineage, |d| d.mutator(name));
    let field = field_at.map(|(_, _, f)| f);
    let accessor = accessor_at.map(|(_, _, a)| a);
    let mutator = mutator_at.map(|(_, _, m)| m);

    // Reported as declared by the accessor's type, else the field's, else the mutator's.
    let declaring = accessor_at
        .map(|(_, d, _)| d)
        .or_else(|| field_at.map(|(_, d, _)| d))
        .or_else(|| mutator_at.map(|(_, d, _)| d))
        .map(|d| d.name.clone())
        .unwrap_or_default();
    // Instances must be at least the most derived contributing type.
    let instance_type = [
        field_at.map(|(i, d, _)| (i, d)),
        accessor_at.map(|(i, d, _)| (i, d)),
        mutator_at.map(|(i, d, _)| (i, d)),
    ]
    .into_iter()
    .flatten()
    .min_by_key(|(i, _)| *i)
    .map(|(_, d)| d.name.clone())
    .unwrap_or_else(|| declaring.clone());

    let reader: Option<Getter> = match (accessor, field) {
        (Some(accessor), _) => Some(Arc::clone(&accessor.getter)),
        (None, Some(field)) => Some(slot_getter(&field.name)),
        (None, None) => None,
    };
    let writer: Option<(Setter, TypeDesc)> = match (mutator, field) {
        (Some(mutator), _) => Some((Arc::clone(&mutator.setter), mutator.accepts.clone())),
        (None, Some(field)) if !field.read_only => {
            Some((slot_setter(&field.name), field.type_desc.clone()))
        }
        _ => None,
    };
    let declared_type = accessor
        .map(|a| a.returns.clone())
        .or_else(|| field.map(|f| f.type_desc.clone()))
        .or_else(|| mutator.map(|m| m.accepts.clone()))
        .unwrap_or(TypeDesc::Any);

    let mut tags: Vec<Tag> = Vec::new();
    let declared = field
        .map(|f| f.tags.as_slice())
        .into_iter()
        .chain(accessor.map(|a| a.tags.as_slice()))
        .chain(mutator.map(|m| m.tags.as_slice()))
        .flatten();
    for tag in declared {
        if !tags.iter().any(|t| t.name() == tag.name()) {
            tags.push(tag.clone());
        }
    }

    let readable = reader.is_some();
    let writable = writer.is_some();
    let access = ObjectAccess {
        type_name: instance_type,
        reader,
        writer,
    };

    MemberDescriptor::new(name, declared_type, TypeDesc::object(&declaring), access)
        .readable(readable)
        .writable(writable)
        .with_tags(tags)
}

fn slot_getter(slot: &str) -> Getter {
    let slot = slot.to_string();
    Arc::new(move |object: &Object| Ok(object.get(&slot)))
}

fn slot_setter(slot: &str) -> Setter {
    let slot = slot.to_string();
    Arc::new(move |object: &mut Object, value: Value| {
        object.set(slot.clone(), value);
        Ok(())
    })
}

struct ObjectAccess {
    type_name: String,
    reader: Option<Getter>,
    writer: Option<(Setter, TypeDesc)>,
}

impl ObjectAccess {
    fn object<'v>(&self, target: &'v Value) -> Result<&'v ObjectRef, AccessFault> {
        match target {
            Value::Object(object) if object.is_a(&self.type_name) => Ok(object),
            other => Err(AccessError::type_mismatch(&self.type_name, other.type_desc().to_string()).into_fault()),
        }
    }
}

impl MemberAccess for ObjectAccess {
    fn read(&self, target: &Value) -> Result<Value, AccessFault> {
        let object = self.object(target)?;
        let reader = self
            .reader
            .as_ref()
            .ok_or_else(|| AccessError::failed("no read path").into_fault())?;
        let guard = object.read();
        reader(&*guard)
    }

    fn write(&self, target: &Value, value: Value) -> Result<(), AccessFault> {
        let object = self.object(target)?;
        let (writer, write_type) = self
            .writer
            .as_ref()
            .ok_or_else(|| AccessError::failed("no write path").into_fault())?;
        if !write_type.accepts(&value) {
            return Err(
                AccessError::type_mismatch(write_type.to_string(), value.type_desc().to_string())
                    .into_fault(),
            );
        }
        let mut guard = object.write();
        writer(&mut *guard, value)
    }
}
