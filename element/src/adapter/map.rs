//! Map and property-store adapters.
//!
//! Members are the live keys. A member resolved by name works whether or
//! not the key exists yet: missing keys read as null and writing inserts.

use crate::{Member, MemberAccess, MemberDescriptor};
use reach_core::{AccessError, AccessFault, MapRef, PropertiesRef, TypeDesc, Value};

pub(crate) fn discover_map(map: &MapRef) -> Vec<Member> {
    let value_type = map.value_type();
    map.keys()
        .into_iter()
        .map(|key| map_template(&value_type, &key))
        .collect()
}

pub(crate) fn map_template(value_type: &TypeDesc, key: &str) -> Member {
    Member::template(MemberDescriptor::new(
        key,
        value_type.clone(),
        TypeDesc::map(value_type.clone()),
        KeyAccess {
            key: key.to_string(),
        },
    ))
}

pub(crate) fn discover_properties(properties: &PropertiesRef) -> Vec<Member> {
    properties
        .keys()
        .into_iter()
        .map(|key| property_template(&key))
        .collect()
}

pub(crate) fn property_template(key: &str) -> Member {
    Member::template(MemberDescriptor::new(
        key,
        TypeDesc::String,
        TypeDesc::Properties,
        PropertyAccess {
            key: key.to_string(),
        },
    ))
}

struct KeyAccess {
    key: String,
}

impl KeyAccess {
    fn map<'v>(target: &'v Value) -> Result<&'v MapRef, AccessFault> {
        target
            .as_map()
            .ok_or_else(|| AccessError::type_mismatch("Map", target.type_name()).into_fault())
    }
}

impl MemberAccess for KeyAccess {
    fn read(&self, target: &Value) -> Result<Value, AccessFault> {
        Ok(Self::map(target)?.get(&self.key))
    }

    fn write(&self, target: &Value, value: Value) -> Result<(), AccessFault> {
        Self::map(target)?
            .insert(self.key.clone(), value)
            .map_err(AccessError::into_fault)
    }
}

struct PropertyAccess {
    key: String,
}

impl PropertyAccess {
    fn properties<'v>(target: &'v Value) -> Result<&'v PropertiesRef, AccessFault> {
        target.as_properties().ok_or_else(|| {
            AccessError::type_mismatch("Properties", target.type_name()).into_fault()
        })
    }
}

impl MemberAccess for PropertyAccess {
    fn read(&self, target: &Value) -> Result<Value, AccessFault> {
        Ok(Self::properties(target)?.get(&self.key).into())
    }

    fn write(&self, target: &Value, value: Value) -> Result<(), AccessFault> {
        let properties = Self::properties(target)?;
        match value {
            Value::String(s) => properties.set(self.key.clone(), s),
            Value::Null => {
                properties.remove(&self.key);
            }
            other => {
                return Err(AccessError::type_mismatch("String", other.type_name()).into_fault())
            }
        }
        Ok(())
    }
}
