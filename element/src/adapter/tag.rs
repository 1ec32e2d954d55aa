//! Metadata-tag adapter: every declared parameter is a read-only member.

use crate::{ElementError, ElementResult, Member, MemberAccess, MemberDescriptor};
use reach_core::{AccessError, AccessFault, TypeDesc, Value};
use reach_registry::Registry;

pub(crate) fn discover(registry: &Registry, tag_name: &str) -> ElementResult<Vec<Member>> {
    let tag_def = registry
        .get_tag(tag_name)
        .ok_or_else(|| ElementError::unknown_type(format!("@{}", tag_name)))?;

    Ok(tag_def
        .params
        .iter()
        .map(|param| {
            let access = ParamAccess {
                param: param.name.clone(),
            };
            Member::template(
                MemberDescriptor::new(
                    param.name.clone(),
                    param.type_desc.clone(),
                    TypeDesc::tag(tag_name),
                    access,
                )
                .writable(false),
            )
        })
        .collect())
}

struct ParamAccess {
    param: String,
}

impl MemberAccess for ParamAccess {
    fn read(&self, target: &Value) -> Result<Value, AccessFault> {
        let tag = target
            .as_tag()
            .ok_or_else(|| AccessError::type_mismatch("Tag", target.type_name()).into_fault())?;
        Ok(tag.get(&self.param).cloned().unwrap_or(Value::Null))
    }

    fn write(&self, _target: &Value, _value: Value) -> Result<(), AccessFault> {
        Err(AccessError::failed("tag parameters are read-only").into_fault())
    }
}
