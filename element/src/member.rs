//! Member handles.
//!
//! A [`MemberDescriptor`] is what an adapter discovers: name, types,
//! capabilities, tags and an access strategy. A [`Member`] wraps a shared
//! descriptor and is either unbound (a template usable against any instance
//! of its declaring type) or bound to one target.

use crate::{ElementError, ElementResult};
use reach_core::{AccessFault, Tag, TypeDesc, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Read and write strategy for one member, applied to an explicit target.
pub trait MemberAccess: Send + Sync {
    /// Read the member's value out of `target`.
    fn read(&self, target: &Value) -> Result<Value, AccessFault>;

    /// Write `value` into `target`.
    fn write(&self, target: &Value, value: Value) -> Result<(), AccessFault>;
}

/// Everything an adapter states about a member.
pub struct MemberDescriptor {
    pub name: String,
    pub declared_type: TypeDesc,
    pub declaring_type: TypeDesc,
    pub readable: bool,
    pub writable: bool,
    pub tags: Vec<Tag>,
    access: Arc<dyn MemberAccess>,
}

impl MemberDescriptor {
    /// A readable and writable descriptor with no tags.
    pub fn new(
        name: impl Into<String>,
        declared_type: TypeDesc,
        declaring_type: TypeDesc,
        access: impl MemberAccess + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type,
            declaring_type,
            readable: true,
            writable: true,
            tags: Vec::new(),
            access: Arc::new(access),
        }
    }

    pub fn readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("declaring_type", &self.declaring_type)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// A polymorphic handle to one named or indexed slot of a container.
#[derive(Clone)]
pub struct Member {
    descriptor: Arc<MemberDescriptor>,
    target: Option<Value>,
}

impl Member {
    /// An unbound member.
    pub fn template(descriptor: MemberDescriptor) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            target: None,
        }
    }

    pub fn descriptor(&self) -> &MemberDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn declared_type(&self) -> &TypeDesc {
        &self.descriptor.declared_type
    }

    pub fn declaring_type(&self) -> &TypeDesc {
        &self.descriptor.declaring_type
    }

    pub fn is_readable(&self) -> bool {
        self.descriptor.readable
    }

    pub fn is_writable(&self) -> bool {
        self.descriptor.writable
    }

    /// Returns true if this member is bound to a target.
    pub fn is_specific(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Value> {
        self.target.as_ref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.descriptor.tags
    }

    /// The first tag of the given type, if any.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.descriptor.tags.iter().find(|t| t.name() == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }

    /// Bind to `target`. The template itself is shared, not copied.
    pub fn bind(&self, target: &Value) -> Member {
        Member {
            descriptor: Arc::clone(&self.descriptor),
            target: Some(target.clone()),
        }
    }

    /// The unbound form of this member.
    pub fn unbound(&self) -> Member {
        Member {
            descriptor: Arc::clone(&self.descriptor),
            target: None,
        }
    }

    /// Read the value from the bound target.
    pub fn value(&self) -> ElementResult<Value> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| ElementError::non_specific(self.name()))?;
        self.read_in(target)
    }

    /// Write a value into the bound target.
    pub fn set(&self, value: impl Into<Value>) -> ElementResult<()> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| ElementError::non_specific(self.name()))?;
        self.write_in(target, value)
    }

    /// Read the value from an explicit target.
    pub fn read_in(&self, target: &Value) -> ElementResult<Value> {
        if !self.is_readable() {
            return Err(ElementError::unreadable(self.name()));
        }
        self.descriptor
            .access
            .read(target)
            .map_err(|source| ElementError::handling(self.name(), source))
    }

    /// Write a value into an explicit target.
    pub fn write_in(&self, target: &Value, value: impl Into<Value>) -> ElementResult<()> {
        if !self.is_writable() {
            return Err(ElementError::unwritable(self.name()));
        }
        self.descriptor
            .access
            .write(target, value.into())
            .map_err(|source| ElementError::handling(self.name(), source))
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        let same_target = match (&self.target, &other.target) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_instance(b),
            _ => false,
        };
        same_target
            && self.descriptor.name == other.descriptor.name
            && self.descriptor.declaring_type == other.descriptor.declaring_type
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.name.hash(state);
        self.descriptor.declaring_type.hash(state);
        self.target.is_some().hash(state);
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Member");
        s.field("name", &self.descriptor.name)
            .field("declared_type", &self.descriptor.declared_type)
            .field("declaring_type", &self.descriptor.declaring_type);
        if let Some(target) = &self.target {
            s.field("target", target);
        }
        s.finish()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: {}",
            self.descriptor.declaring_type, self.descriptor.name, self.descriptor.declared_type
        )
    }
}
