use std::collections::HashMap;

use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub(super) struct Relation {
    pub(super) column: String,
    pub(super) target: String,
}

/// How one record scope is laid out in SQLite.
#[derive(Debug, Clone)]
#[must_use]
pub struct TableMapping {
    pub(super) table: String,
    pub(super) primary_key: String,
    pub(super) label_column: Option<String>,
    columns: HashMap<String, String>,
    relations: HashMap<String, Relation>,
}

impl TableMapping {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: "id".into(),
            label_column: None,
            columns: HashMap::new(),
            relations: HashMap::new(),
        }
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Column shown when a rival is reported.
    pub fn label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = Some(column.into());
        self
    }

    /// Maps an attribute onto a differently named column.
    pub fn column(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    /// Declares `field` as a foreign key stored in `column`, pointing at the
    /// primary key of the `target` scope.
    pub fn relation(
        mut self,
        field: impl Into<String>,
        column: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.relations.insert(
            field.into(),
            Relation {
                column: column.into(),
                target: target.into(),
            },
        );
        self
    }

    pub(super) fn column_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.columns.get(field).map_or(field, String::as_str)
    }

    pub(super) fn relation_for(&self, field: &str) -> Option<&Relation> {
        self.relations.get(field)
    }
}

/// Scope name to table layout.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SqliteMappings {
    tables: HashMap<String, TableMapping>,
}

impl SqliteMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, scope: impl Into<String>, mapping: TableMapping) -> Self {
        self.tables.insert(scope.into(), mapping);
        self
    }

    pub(super) fn get(&self, scope: &str) -> DomainResult<&TableMapping> {
        self.tables.get(scope).ok_or_else(|| {
            DomainError::Persistence(format!("no table mapping registered for `{scope}`"))
        })
    }
}

pub(super) fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
