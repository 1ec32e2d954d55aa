//! Copying member values between containers.
//!
//! Source and destination members are paired by name. A pair is copied when
//! the source is readable, the destination writable, and the filter (if any)
//! accepts it. Non-null values are transformed and then assigned only if the
//! destination's declared type accepts them; incompatible pairs are skipped.

use crate::{ElementResult, Elements, Member, Selector};
use reach_core::Value;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Applied to every non-null value before assignment.
pub type ValueTransform = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Decides whether one source/destination pair is copied.
pub type CopyFilter = Arc<dyn Fn(&ElementCopy<'_>) -> bool + Send + Sync>;

/// One candidate copy, as seen by a [`CopyFilter`].
#[derive(Debug)]
pub struct ElementCopy<'a> {
    pub source: &'a Member,
    pub destination: &'a Member,
    /// The source value, before any transform.
    pub value: &'a Value,
}

/// Copy configuration.
#[derive(Clone, Default)]
pub struct CopyOptions {
    pub transform: Option<ValueTransform>,
    pub filter: Option<CopyFilter>,
    /// Leave the destination untouched when the source value is null.
    pub skip_nulls: bool,
    /// Chooses the source members; defaults to every member including inherited ones.
    pub selector: Option<Selector>,
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    pub fn with_filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&ElementCopy<'_>) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(f));
        self
    }

    pub fn with_skip_nulls(mut self, skip_nulls: bool) -> Self {
        self.skip_nulls = skip_nulls;
        self
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }
}

impl fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyOptions")
            .field("transform", &self.transform.is_some())
            .field("filter", &self.filter.is_some())
            .field("skip_nulls", &self.skip_nulls)
            .field("selector", &self.selector.is_some())
            .finish()
    }
}

/// Copies member values from one container to another.
#[derive(Debug, Clone)]
pub struct Copier {
    elements: Elements,
    options: CopyOptions,
}

impl Copier {
    pub(crate) fn new(elements: Elements) -> Self {
        Self {
            elements,
            options: CopyOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CopyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn applying<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.options = self.options.with_transform(f);
        self
    }

    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&ElementCopy<'_>) -> bool + Send + Sync + 'static,
    {
        self.options = self.options.with_filter(f);
        self
    }

    pub fn skip_nulls(mut self) -> Self {
        self.options.skip_nulls = true;
        self
    }

    pub fn selecting(mut self, selector: Selector) -> Self {
        self.options.selector = Some(selector);
        self
    }

    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Copy from `source` into `destination`. Returns the number of members assigned.
    pub fn copy(&self, source: &Value, destination: &Value) -> ElementResult<usize> {
        let sources = match &self.options.selector {
            Some(selector) => selector.find_all(source)?,
            None => self.elements.members_of(source, true)?,
        };
        // Same object type on both sides: reuse the source templates.
        let same_type = source.container_kind().is_some_and(|k| k.is_type_level())
            && source.type_desc() == destination.type_desc();

        let mut copied = 0;
        for src in &sources {
            let dest = if same_type {
                Some(src.bind(destination))
            } else {
                self.elements.member_of(destination, src.name(), true)?
            };
            let Some(dest) = dest else {
                trace!(member = src.name(), "no destination member");
                continue;
            };
            if !src.is_readable() || !dest.is_writable() {
                trace!(member = src.name(), "not readable/writable");
                continue;
            }

            let value = src.read_in(source)?;
            if let Some(filter) = &self.options.filter {
                let candidate = ElementCopy {
                    source: src,
                    destination: &dest,
                    value: &value,
                };
                if !filter(&candidate) {
                    trace!(member = src.name(), "filtered out");
                    continue;
                }
            }

            if value.is_null() {
                if self.options.skip_nulls {
                    trace!(member = src.name(), "null skipped");
                    continue;
                }
                dest.set(Value::Null)?;
                copied += 1;
                continue;
            }

            let value = match &self.options.transform {
                Some(transform) => transform(&value),
                None => value,
            };
            if !dest.declared_type().accepts(&value) {
                trace!(
                    member = src.name(),
                    expected = %dest.declared_type(),
                    actual = %value.type_desc(),
                    "incompatible types"
                );
                continue;
            }
            dest.set(value)?;
            copied += 1;
        }
        Ok(copied)
    }
}
