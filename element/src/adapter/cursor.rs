//! Row-cursor adapter.
//!
//! Members are synthesized per request: a numeric name is a 1-based column
//! ordinal, anything else a column label. Cursor members are never writable.

use super::is_numeric;
use crate::{ElementError, ElementResult, Member, MemberAccess, MemberDescriptor};
use reach_core::{AccessError, AccessFault, CursorRef, TypeDesc, Value};

enum Column {
    Ordinal(usize),
    Label(String),
}

/// One member per column ordinal of the live cursor.
pub(crate) fn discover(cursor: &CursorRef) -> ElementResult<Vec<Member>> {
    let count = cursor
        .cursor()
        .column_count()
        .map_err(|source| ElementError::handling("column_count", source))?;
    Ok((1..=count)
        .map(|ordinal| template(&ordinal.to_string()))
        .collect())
}

pub(crate) fn template(name: &str) -> Member {
    let column = match name.parse() {
        Ok(ordinal) if is_numeric(name) => Column::Ordinal(ordinal),
        _ => Column::Label(name.to_string()),
    };
    Member::template(
        MemberDescriptor::new(name, TypeDesc::Any, TypeDesc::Cursor, ColumnAccess { column })
            .writable(false),
    )
}

struct ColumnAccess {
    column: Column,
}

impl MemberAccess for ColumnAccess {
    fn read(&self, target: &Value) -> Result<Value, AccessFault> {
        let cursor = target
            .as_cursor()
            .ok_or_else(|| AccessError::type_mismatch("Cursor", target.type_name()).into_fault())?;
        match &self.column {
            Column::Ordinal(ordinal) => cursor.cursor().by_ordinal(*ordinal),
            Column::Label(label) => cursor.cursor().by_label(label),
        }
    }

    fn write(&self, _target: &Value, _value: Value) -> Result<(), AccessFault> {
        Err(AccessError::failed("cursor columns are read-only").into_fault())
    }
}
