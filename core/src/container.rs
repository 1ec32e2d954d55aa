//! Container instances.
//!
//! Containers are shared handles: cloning a `ListRef` or `ObjectRef` clones
//! the handle, not the data, so a member bound to one handle writes through
//! to every other holder of the same instance.

use crate::{AccessError, AccessFault, TypeDesc, Value};
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

// ==================== Structured objects ====================

/// A structured object: a registered type name plus its field slots.
#[derive(Debug, Clone)]
pub struct Object {
    type_name: String,
    /// Transitive supertype names (not including `type_name`).
    supertypes: Arc<[String]>,
    slots: HashMap<String, Value>,
}

impl Object {
    /// Create an empty object. The registry normally does this through
    /// `Registry::instantiate`, which also fills declared field defaults.
    pub fn new(type_name: impl Into<String>, supertypes: Vec<String>) -> Self {
        Self {
            type_name: type_name.into(),
            supertypes: supertypes.into(),
            slots: HashMap::new(),
        }
    }

    /// The registered type name of this object.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns true if this object is an instance of `name` or one of its subtypes.
    pub fn is_a(&self, name: &str) -> bool {
        self.type_name == name || self.supertypes.iter().any(|s| s == name)
    }

    /// Read a slot. Missing slots read as null.
    pub fn get(&self, name: &str) -> Value {
        self.slots.get(name).cloned().unwrap_or(Value::Null)
    }

    /// Borrow a slot if present.
    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }

    /// Write a slot.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.slots.insert(name.into(), value.into());
    }
}

/// Shared handle to an [`Object`].
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<Object>>);

impl ObjectRef {
    pub fn new(object: Object) -> Self {
        Self(Arc::new(RwLock::new(object)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Object> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Object> {
        self.0.write()
    }

    /// The registered type name of the referenced object.
    pub fn type_name(&self) -> String {
        self.0.read().type_name.clone()
    }

    pub fn is_a(&self, name: &str) -> bool {
        self.0.read().is_a(name)
    }

    /// Read a slot directly, bypassing accessors.
    pub fn get(&self, name: &str) -> Value {
        self.0.read().get(name)
    }

    /// Write a slot directly, bypassing mutators.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.write().set(name, value);
    }

    /// Reference identity.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Slots are not printed: object graphs may be cyclic.
        write!(f, "ObjectRef({}@{:p})", self.type_name(), Arc::as_ptr(&self.0))
    }
}

// ==================== Sequences ====================

/// A sequence of values with a declared element type.
#[derive(Debug, Clone)]
pub struct List {
    element_type: TypeDesc,
    items: Vec<Value>,
}

/// Shared handle to a [`List`].
#[derive(Clone)]
pub struct ListRef(Arc<RwLock<List>>);

impl ListRef {
    pub fn new(element_type: TypeDesc, items: Vec<Value>) -> Self {
        Self(Arc::new(RwLock::new(List {
            element_type,
            items,
        })))
    }

    pub fn element_type(&self) -> TypeDesc {
        self.0.read().element_type.clone()
    }

    pub fn len(&self) -> usize {
        self.0.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().items.is_empty()
    }

    /// Read the item at `index`.
    pub fn get(&self, index: usize) -> Result<Value, AccessError> {
        let list = self.0.read();
        list.items
            .get(index)
            .cloned()
            .ok_or(AccessError::IndexOutOfBounds {
                index,
                len: list.items.len(),
            })
    }

    /// Replace the item at `index`, checking the element type.
    pub fn set(&self, index: usize, value: Value) -> Result<(), AccessError> {
        let mut list = self.0.write();
        if !list.element_type.accepts(&value) {
            return Err(AccessError::type_mismatch(
                list.element_type.to_string(),
                value.type_desc().to_string(),
            ));
        }
        let len = list.items.len();
        match list.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(AccessError::IndexOutOfBounds { index, len }),
        }
    }

    /// Append an item, checking the element type.
    pub fn push(&self, value: impl Into<Value>) -> Result<(), AccessError> {
        let value = value.into();
        let mut list = self.0.write();
        if !list.element_type.accepts(&value) {
            return Err(AccessError::type_mismatch(
                list.element_type.to_string(),
                value.type_desc().to_string(),
            ));
        }
        list.items.push(value);
        Ok(())
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Vec<Value> {
        self.0.read().items.clone()
    }

    pub fn ptr_eq(&self, other: &ListRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.0.read();
        write!(f, "ListRef<{}>(len={})", list.element_type, list.items.len())
    }
}

// ==================== Maps ====================

/// A string-keyed map, ordered by key, with a declared value type.
#[derive(Debug, Clone)]
pub struct Map {
    value_type: TypeDesc,
    entries: BTreeMap<String, Value>,
}

/// Shared handle to a [`Map`].
#[derive(Clone)]
pub struct MapRef(Arc<RwLock<Map>>);

impl MapRef {
    pub fn new(value_type: TypeDesc) -> Self {
        Self(Arc::new(RwLock::new(Map {
            value_type,
            entries: BTreeMap::new(),
        })))
    }

    pub fn value_type(&self) -> TypeDesc {
        self.0.read().value_type.clone()
    }

    pub fn len(&self) -> usize {
        self.0.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().entries.contains_key(key)
    }

    /// Read a value. Missing keys read as null.
    pub fn get(&self, key: &str) -> Value {
        self.0.read().entries.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Insert or replace a value, checking the value type.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), AccessError> {
        let value = value.into();
        let mut map = self.0.write();
        if !map.value_type.accepts(&value) {
            return Err(AccessError::type_mismatch(
                map.value_type.to_string(),
                value.type_desc().to_string(),
            ));
        }
        map.entries.insert(key.into(), value);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.write().entries.remove(key)
    }

    /// Snapshot of the current keys, in order.
    pub fn keys(&self) -> Vec<String> {
        self.0.read().entries.keys().cloned().collect()
    }

    /// Snapshot of the current values, in key order.
    pub fn values(&self) -> Vec<Value> {
        self.0.read().entries.values().cloned().collect()
    }

    pub fn ptr_eq(&self, other: &MapRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.0.read();
        write!(f, "MapRef<{}>(len={})", map.value_type, map.entries.len())
    }
}

// ==================== Property stores ====================

/// Shared handle to a string-to-string property store.
#[derive(Clone, Default)]
pub struct PropertiesRef(Arc<RwLock<BTreeMap<String, String>>>);

impl PropertiesRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.0.read().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.0.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.0.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Snapshot of the current keys, in order.
    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().cloned().collect()
    }

    pub fn ptr_eq(&self, other: &PropertiesRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PropertiesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.read().iter()).finish()
    }
}

/// Helper macro to create property stores.
#[macro_export]
macro_rules! properties {
    () => {
        $crate::PropertiesRef::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let store = $crate::PropertiesRef::new();
            $(
                store.set($key, $value);
            )+
            store
        }
    };
}

// ==================== Row cursors ====================

/// A cursor over tabular rows, positioned by its owner.
///
/// Column access is a foreign call and may fail at any time.
pub trait RowCursor: Send + Sync {
    /// Number of columns in the current result.
    fn column_count(&self) -> Result<usize, AccessFault>;

    /// Value of the column at a 1-based ordinal on the current row.
    fn by_ordinal(&self, ordinal: usize) -> Result<Value, AccessFault>;

    /// Value of the labelled column on the current row.
    fn by_label(&self, label: &str) -> Result<Value, AccessFault>;
}

/// Shared handle to a [`RowCursor`].
#[derive(Clone)]
pub struct CursorRef(Arc<dyn RowCursor>);

impl CursorRef {
    pub fn new(cursor: impl RowCursor + 'static) -> Self {
        Self(Arc::new(cursor))
    }

    /// Wrap a cursor the caller keeps a handle to, e.g. to advance it.
    pub fn from_shared(cursor: Arc<dyn RowCursor>) -> Self {
        Self(cursor)
    }

    pub fn cursor(&self) -> &dyn RowCursor {
        self.0.as_ref()
    }

    pub fn ptr_eq(&self, other: &CursorRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CursorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CursorRef({:p})", Arc::as_ptr(&self.0))
    }
}

/// An in-memory row cursor.
#[derive(Debug)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: Mutex<Option<usize>>,
}

impl RowSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            position: Mutex::new(None),
        }
    }

    /// Append a row; missing trailing columns read as null.
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Advance to the next row. Returns false once the rows are exhausted.
    pub fn next(&self) -> bool {
        let mut position = self.position.lock();
        let next = position.map_or(0, |p| p + 1);
        if next < self.rows.len() {
            *position = Some(next);
            true
        } else {
            *position = Some(self.rows.len());
            false
        }
    }

    fn current_row(&self) -> Result<&Vec<Value>, AccessFault> {
        let position = *self.position.lock();
        position
            .and_then(|p| self.rows.get(p))
            .ok_or_else(|| AccessError::NoCurrentRow.into_fault())
    }
}

impl RowCursor for RowSet {
    fn column_count(&self) -> Result<usize, AccessFault> {
        Ok(self.columns.len())
    }

    fn by_ordinal(&self, ordinal: usize) -> Result<Value, AccessFault> {
        let count = self.columns.len();
        if ordinal == 0 || ordinal > count {
            return Err(AccessError::ColumnOutOfRange { ordinal, count }.into_fault());
        }
        let row = self.current_row()?;
        Ok(row.get(ordinal - 1).cloned().unwrap_or(Value::Null))
    }

    fn by_label(&self, label: &str) -> Result<Value, AccessFault> {
        let index = self
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(label))
            .ok_or_else(|| AccessError::UnknownColumn(label.to_string()).into_fault())?;
        self.by_ordinal(index + 1)
    }
}
