//! A runtime structured record: declared fields, optional per-field defaults.
//!
//! Records cover the middle ground between serde-backed model types and
//! hand-written plain objects: the attribute set is declared up front on a
//! schema rather than on a Rust type, so shapes can be assembled at runtime.
//! Discovery reports every declared field even before a value is set, the
//! same guarantee model types get from serde.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::MapError;
use crate::source::AttrSource;
use crate::value::{AttrMap, AttrValue};

#[derive(Debug, Clone)]
struct FieldDef {
    name: String,
    default: Option<AttrValue>,
}

/// The declared field set of a [`Record`].
#[derive(Debug, Clone, Default)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDef>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declares a field with no default value.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Declares a field that reads as `default` until a value is set.
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        default: impl Into<AttrValue>,
    ) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

/// A record instance: a shared schema plus the values set so far.
///
/// # Examples
///
/// ```
/// use attrmap::{Record, RecordSchema};
/// use std::sync::Arc;
///
/// let schema = Arc::new(
///     RecordSchema::new("profile")
///         .field("name")
///         .field_with_default("city", "NY"),
/// );
///
/// let record = Record::new(schema).with("name", "Johnny");
/// assert_eq!(record.get("city"), Some(&"NY".into()));
/// ```
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: AttrMap,
}

impl Record {
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        Self {
            schema,
            values: AttrMap::new(),
        }
    }

    /// Sets a field value, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// The field's set value, or its schema default when unset.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        if let Some(value) = self.values.get(name) {
            return Some(value);
        }
        self.schema
            .fields
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| field.default.as_ref())
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }
}

impl AttrSource for Record {
    fn read(&self) -> Result<AttrMap, MapError> {
        let mut attrs = AttrMap::new();
        for field in &self.schema.fields {
            if let Some(default) = &field.default {
                attrs.insert(field.name.clone(), default.clone());
            }
        }
        attrs.extend(self.values.clone());
        Ok(attrs)
    }

    fn discover(&self) -> Result<BTreeSet<String>, MapError> {
        // Declared fields count as discoverable even when no value is set.
        let mut names: BTreeSet<String> =
            self.schema.fields.iter().map(|f| f.name.clone()).collect();
        names.extend(self.values.keys().cloned());
        Ok(names)
    }
}
