use crate::domain::slug::value_objects::RecordId;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    Date,
    DateTime,
    Relation,
    Slug,
}

impl FieldKind {
    /// Date-valued kinds partition scopes by year/month/day.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

/// Schema information about one attribute of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: String,
    pub kind: FieldKind,
    /// Whether the attribute may legitimately be left empty.
    pub optional: bool,
}

impl FieldMeta {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

pub type Accessor = Arc<dyn Fn() -> FieldValue + Send + Sync>;

/// A value read off a record.
#[derive(Clone)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Record(Arc<dyn Record>),
    /// Zero-argument accessor, evaluated on read.
    Method(Accessor),
}

impl FieldValue {
    #[must_use]
    pub fn method<F>(accessor: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        Self::Method(Arc::new(accessor))
    }

    #[must_use]
    pub fn record(record: impl Record + 'static) -> Self {
        Self::Record(Arc::new(record))
    }

    /// Resolves accessors until a concrete value remains.
    #[must_use]
    pub fn evaluate(self) -> Self {
        let mut value = self;
        while let Self::Method(accessor) = value {
            value = accessor();
        }
        value
    }

    /// Falsy values: null, empty text, `0` and `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null | Self::Integer(0) | Self::Bool(false) => true,
            Self::Text(text) => text.is_empty(),
            Self::Method(accessor) => accessor().is_empty(),
            Self::Integer(_)
            | Self::Bool(true)
            | Self::Date(_)
            | Self::DateTime(_)
            | Self::Record(_) => false,
        }
    }

    /// Text form used when the value populates a slug; falsy values yield `None`.
    #[must_use]
    pub fn as_candidate(&self) -> Option<String> {
        if let Self::Method(accessor) = self {
            return accessor().as_candidate();
        }
        if self.is_empty() {
            return None;
        }
        let text = match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Date(value) => value.format("%Y-%m-%d").to_string(),
            Self::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Record(record) => record.label(),
            Self::Null | Self::Method(_) => return None,
        };
        if text.is_empty() { None } else { Some(text) }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(value) => Some(*value),
            Self::DateTime(value) => Some(value.date()),
            Self::Method(accessor) => accessor().as_date(),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Date(value) => f.debug_tuple("Date").field(value).finish(),
            Self::DateTime(value) => f.debug_tuple("DateTime").field(value).finish(),
            Self::Record(record) => f
                .debug_tuple("Record")
                .field(&record.model_name())
                .field(&record.primary_key())
                .finish(),
            Self::Method(_) => f.write_str("Method(..)"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Read access to a host record: its schema, primary key and attribute values.
pub trait Record: Send + Sync {
    fn model_name(&self) -> &str;

    /// `None` while the record has not been saved yet.
    fn primary_key(&self) -> Option<RecordId>;

    fn field(&self, name: &str) -> Option<FieldMeta>;

    /// Reads an attribute; unknown names read as `Null`.
    fn value(&self, name: &str) -> FieldValue;

    #[must_use]
    fn label(&self) -> String {
        self.primary_key().map_or_else(
            || format!("{} object (unsaved)", self.model_name()),
            |id| format!("{} object ({id})", self.model_name()),
        )
    }
}

pub trait RecordMut: Record {
    fn set_value(&mut self, name: &str, value: FieldValue);
}

/// Owned, in-memory record.
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    model: String,
    id: Option<RecordId>,
    label: Option<String>,
    fields: Vec<(FieldMeta, FieldValue)>,
}

impl RecordSnapshot {
    pub fn builder(model: impl Into<String>) -> RecordSnapshotBuilder {
        RecordSnapshotBuilder {
            snapshot: Self {
                model: model.into(),
                id: None,
                label: None,
                fields: Vec::new(),
            },
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(meta, _)| meta.name == name)
    }
}

impl Record for RecordSnapshot {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn primary_key(&self) -> Option<RecordId> {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldMeta> {
        self.position(name).map(|idx| self.fields[idx].0.clone())
    }

    fn value(&self, name: &str) -> FieldValue {
        self.position(name)
            .map_or(FieldValue::Null, |idx| self.fields[idx].1.clone())
    }

    fn label(&self) -> String {
        match (&self.label, self.id) {
            (Some(label), _) => label.clone(),
            (None, Some(id)) => format!("{} object ({id})", self.model),
            (None, None) => format!("{} object (unsaved)", self.model),
        }
    }
}

impl RecordMut for RecordSnapshot {
    fn set_value(&mut self, name: &str, value: FieldValue) {
        if let Some(idx) = self.position(name) {
            self.fields[idx].1 = value;
        } else {
            self.fields.push((FieldMeta::new(name, FieldKind::Text), value));
        }
    }
}

#[must_use]
pub struct RecordSnapshotBuilder {
    snapshot: RecordSnapshot,
}

impl RecordSnapshotBuilder {
    pub const fn id(mut self, id: i64) -> Self {
        self.snapshot.id = Some(RecordId(id));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.snapshot.label = Some(label.into());
        self
    }

    pub fn field(mut self, name: &str, kind: FieldKind, value: impl Into<FieldValue>) -> Self {
        self.snapshot
            .fields
            .push((FieldMeta::new(name, kind), value.into()));
        self
    }

    pub fn optional_field(
        mut self,
        name: &str,
        kind: FieldKind,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.snapshot
            .fields
            .push((FieldMeta::new(name, kind).optional(), value.into()));
        self
    }

    pub fn build(self) -> RecordSnapshot {
        self.snapshot
    }
}
