//! Scope paths from `unique_with` and their resolution into equality lookups.
//!
//! A path such as `pub_date__month` or `author__name` is parsed once, when the
//! slug configuration is built, and resolved against a concrete record on every
//! save. Resolution produces the `(key, value)` pairs which, combined with the
//! slug itself, define what counts as a rival record.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::record::{FieldValue, Record};
use crate::domain::slug::value_objects::RecordId;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

pub const LOOKUP_SEP: &str = "__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePart {
    Year,
    Month,
    Day,
}

impl DatePart {
    pub const ALL: [Self; 3] = [Self::Year, Self::Month, Self::Day];

    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }

    /// Every part from `year` down to and including `self`.
    #[must_use]
    pub fn up_to(self) -> &'static [Self] {
        let end = match self {
            Self::Year => 1,
            Self::Month => 2,
            Self::Day => 3,
        };
        &Self::ALL[..end]
    }

    #[must_use]
    pub fn extract(self, date: NaiveDate) -> i64 {
        match self {
            Self::Year => i64::from(date.year()),
            Self::Month => i64::from(date.month()),
            Self::Day => i64::from(date.day()),
        }
    }
}

/// A parsed `unique_with` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopePath {
    Flat(String),
    DateGranularity(String, DatePart),
    Nested(String, Box<Self>),
}

impl ScopePath {
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` for empty or malformed segments.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let Some((field, inner)) = raw.split_once(LOOKUP_SEP) else {
            return if raw.is_empty() {
                Err(DomainError::configuration(
                    "empty attribute name in `unique_with`",
                ))
            } else {
                Ok(Self::Flat(raw.to_string()))
            };
        };

        if field.is_empty() {
            return Err(DomainError::configuration(format!(
                "empty attribute name in `unique_with` path \"{raw}\""
            )));
        }

        if !inner.contains(LOOKUP_SEP)
            && let Some(part) = DatePart::parse(inner)
        {
            return Ok(Self::DateGranularity(field.to_string(), part));
        }

        let inner = Self::parse(inner).map_err(|_| {
            DomainError::configuration(format!(
                "malformed `unique_with` path \"{raw}\""
            ))
        })?;
        Ok(Self::Nested(field.to_string(), Box::new(inner)))
    }

    /// The attribute this path starts from.
    #[must_use]
    pub fn field_name(&self) -> &str {
        match self {
            Self::Flat(name)
            | Self::DateGranularity(name, _)
            | Self::Nested(name, _) => name,
        }
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(name) => f.write_str(name),
            Self::DateGranularity(name, part) => {
                write!(f, "{name}{LOOKUP_SEP}{}", part.as_str())
            }
            Self::Nested(name, inner) => write!(f, "{name}{LOOKUP_SEP}{inner}"),
        }
    }
}

/// Exact-match value of a scope constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScopeValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Primary key of a related record.
    Key(RecordId),
}

impl From<&str> for ScopeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScopeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ScopeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeLookup {
    pub key: String,
    pub value: ScopeValue,
}

impl ScopeLookup {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<ScopeValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Names used in diagnostics: the model and slug attribute being saved.
#[derive(Debug, Clone, Copy)]
struct Origin<'a> {
    model: &'a str,
    slug_field: &'a str,
}

/// Resolves every `unique_with` path against `record`.
///
/// Lookups from all paths combine with logical AND. An empty optional attribute
/// drops its own constraint; an empty required one is an error, since the slug
/// must be computed after everything it is scoped by.
///
/// # Errors
///
/// `Configuration` for unknown, self-referencing or unresolvable paths and
/// `MissingDependency` for empty required attributes or unsaved related records.
pub fn resolve_scope_lookups(
    slug_field: &str,
    paths: &[ScopePath],
    record: &dyn Record,
) -> DomainResult<Vec<ScopeLookup>> {
    let origin = Origin {
        model: record.model_name(),
        slug_field,
    };

    let mut lookups = Vec::new();
    for path in paths {
        lookups.extend(resolve_path(origin, path, record, true)?);
    }

    tracing::debug!(
        model = origin.model,
        field = slug_field,
        lookups = lookups.len(),
        "resolved uniqueness scope"
    );
    Ok(lookups)
}

fn resolve_path(
    origin: Origin<'_>,
    path: &ScopePath,
    record: &dyn Record,
    top_level: bool,
) -> DomainResult<Vec<ScopeLookup>> {
    let field_name = path.field_name();
    let model = record.model_name();

    let meta = record.field(field_name).ok_or_else(|| {
        DomainError::configuration(format!(
            "could not find attribute {model}.{field_name} referenced by {}.{} \
             (see constraint `unique_with`)",
            origin.model, origin.slug_field
        ))
    })?;

    if top_level && field_name == origin.slug_field {
        return Err(DomainError::configuration(format!(
            "attribute {model}.{field_name} references itself in `unique_with`; \
             use `unique` for this case"
        )));
    }

    let value = record.value(field_name).evaluate();
    if value.is_empty() {
        if meta.optional {
            tracing::debug!(
                model,
                path = %path,
                "dropping scope constraint on empty optional attribute"
            );
            return Ok(Vec::new());
        }
        return Err(DomainError::missing_dependency(format!(
            "could not check uniqueness of {}.{} with respect to {model}.{field_name} \
             because the latter is empty; declare \"{}\" after all attributes listed \
             in `unique_with`",
            origin.model, origin.slug_field, origin.slug_field
        )));
    }

    if meta.kind.is_date() {
        let granularity = date_granularity(origin, path)?;
        let date = value.as_date().ok_or_else(|| {
            DomainError::configuration(format!(
                "attribute {model}.{field_name} is declared as a date but holds {value:?}"
            ))
        })?;
        return Ok(granularity
            .up_to()
            .iter()
            .map(|part| {
                ScopeLookup::new(
                    format!("{field_name}{LOOKUP_SEP}{}", part.as_str()),
                    part.extract(date),
                )
            })
            .collect());
    }

    let inner = match path {
        ScopePath::Flat(_) => {
            let value = scope_value(origin, path, value)?;
            return Ok(vec![ScopeLookup {
                key: field_name.to_string(),
                value,
            }]);
        }
        ScopePath::DateGranularity(_, part) => ScopePath::Flat(part.as_str().to_string()),
        ScopePath::Nested(_, inner) => inner.as_ref().clone(),
    };

    let FieldValue::Record(related) = value else {
        return Err(DomainError::configuration(format!(
            "could not resolve lookup \"{path}\" in `unique_with` of {}.{}",
            origin.model, origin.slug_field
        )));
    };

    let lookups = resolve_path(origin, &inner, related.as_ref(), false)?;
    Ok(lookups
        .into_iter()
        .map(|lookup| ScopeLookup {
            key: format!("{field_name}{LOOKUP_SEP}{}", lookup.key),
            value: lookup.value,
        })
        .collect())
}

fn date_granularity(origin: Origin<'_>, path: &ScopePath) -> DomainResult<DatePart> {
    match path {
        ScopePath::Flat(_) => Ok(DatePart::Day),
        ScopePath::DateGranularity(_, part) => Ok(*part),
        ScopePath::Nested(_, inner) => match inner.as_ref() {
            ScopePath::Flat(token) => Err(DomainError::configuration(format!(
                "expected one of year, month, day, got \"{token}\" in \"{path}\""
            ))),
            _ => Err(DomainError::configuration(format!(
                "the `unique_with` constraint in {}.{} is set to \"{path}\", but only one \
                 level of nesting is accepted for dates (e.g. \"date__month\")",
                origin.model, origin.slug_field
            ))),
        },
    }
}

fn scope_value(origin: Origin<'_>, path: &ScopePath, value: FieldValue) -> DomainResult<ScopeValue> {
    match value {
        FieldValue::Text(text) => Ok(ScopeValue::Text(text)),
        FieldValue::Integer(value) => Ok(ScopeValue::Integer(value)),
        FieldValue::Bool(value) => Ok(ScopeValue::Bool(value)),
        FieldValue::Date(value) => Ok(ScopeValue::Date(value)),
        FieldValue::DateTime(value) => Ok(ScopeValue::DateTime(value)),
        FieldValue::Record(related) => related.primary_key().map(ScopeValue::Key).ok_or_else(|| {
            DomainError::missing_dependency(format!(
                "{} referenced by \"{path}\" in `unique_with` of {}.{} has not been saved",
                related.label(),
                origin.model,
                origin.slug_field
            ))
        }),
        FieldValue::Null | FieldValue::Method(_) => Err(DomainError::configuration(format!(
            "could not resolve lookup \"{path}\" in `unique_with` of {}.{}",
            origin.model, origin.slug_field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::record::{FieldKind, RecordSnapshot};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paths(raw: &[&str]) -> Vec<ScopePath> {
        raw.iter().map(|p| ScopePath::parse(p).unwrap()).collect()
    }

    fn article() -> RecordSnapshot {
        let team = RecordSnapshot::builder("Team")
            .id(3)
            .field("name", FieldKind::Text, "core")
            .build();
        let author = RecordSnapshot::builder("User")
            .id(7)
            .field("name", FieldKind::Text, "alice")
            .field("team", FieldKind::Relation, FieldValue::record(team))
            .field("joined", FieldKind::Date, date(2020, 6, 1))
            .build();
        RecordSnapshot::builder("Article")
            .id(1)
            .field("title", FieldKind::Text, "Hello world")
            .field("pub_date", FieldKind::Date, date(2024, 3, 15))
            .field("author", FieldKind::Relation, FieldValue::record(author))
            .optional_field("editor", FieldKind::Relation, FieldValue::Null)
            .field("category", FieldKind::Text, "")
            .field("rank", FieldKind::Integer, 0_i64)
            .field("slug", FieldKind::Slug, "")
            .build()
    }

    #[test]
    fn parse_distinguishes_path_shapes() {
        assert_eq!(ScopePath::parse("author").unwrap(), ScopePath::Flat("author".into()));
        assert_eq!(
            ScopePath::parse("pub_date__month").unwrap(),
            ScopePath::DateGranularity("pub_date".into(), DatePart::Month)
        );
        assert_eq!(
            ScopePath::parse("author__team__name").unwrap(),
            ScopePath::Nested(
                "author".into(),
                Box::new(ScopePath::Nested(
                    "team".into(),
                    Box::new(ScopePath::Flat("name".into()))
                ))
            )
        );
        assert_eq!(
            ScopePath::parse("author__team__name").unwrap().to_string(),
            "author__team__name"
        );
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert!(ScopePath::parse("").is_err());
        assert!(ScopePath::parse("__month").is_err());
        assert!(ScopePath::parse("author__").is_err());
        assert!(ScopePath::parse("a____b").is_err());
    }

    #[test]
    fn month_granularity_emits_year_and_month() {
        let lookups =
            resolve_scope_lookups("slug", &paths(&["pub_date__month"]), &article()).unwrap();
        assert_eq!(
            lookups,
            vec![
                ScopeLookup::new("pub_date__year", 2024_i64),
                ScopeLookup::new("pub_date__month", 3_i64),
            ]
        );
    }

    #[test]
    fn date_without_granularity_defaults_to_day() {
        let lookups = resolve_scope_lookups("slug", &paths(&["pub_date"]), &article()).unwrap();
        let keys: Vec<_> = lookups.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, ["pub_date__year", "pub_date__month", "pub_date__day"]);
        assert_eq!(lookups[2].value, ScopeValue::Integer(15));
    }

    #[test]
    fn date_rejects_unknown_token_and_deep_nesting() {
        let err = resolve_scope_lookups("slug", &paths(&["pub_date__week"]), &article())
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(msg) if msg.contains("week")));

        let err = resolve_scope_lookups("slug", &paths(&["pub_date__month__day"]), &article())
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(msg) if msg.contains("one level")));
    }

    #[test]
    fn relation_resolves_to_primary_key() {
        let lookups = resolve_scope_lookups("slug", &paths(&["author"]), &article()).unwrap();
        assert_eq!(lookups, vec![ScopeLookup::new("author", ScopeValue::Key(RecordId(7)))]);
    }

    #[test]
    fn nested_path_keeps_outer_key() {
        let lookups =
            resolve_scope_lookups("slug", &paths(&["author__name"]), &article()).unwrap();
        assert_eq!(lookups, vec![ScopeLookup::new("author__name", "alice")]);

        let lookups =
            resolve_scope_lookups("slug", &paths(&["author__joined__year"]), &article()).unwrap();
        assert_eq!(lookups, vec![ScopeLookup::new("author__joined__year", 2020_i64)]);
    }

    #[test]
    fn nested_path_follows_several_relations() {
        let lookups =
            resolve_scope_lookups("slug", &paths(&["author__team__name"]), &article()).unwrap();
        assert_eq!(lookups, vec![ScopeLookup::new("author__team__name", "core")]);

        let lookups =
            resolve_scope_lookups("slug", &paths(&["author__team"]), &article()).unwrap();
        assert_eq!(
            lookups,
            vec![ScopeLookup::new("author__team", ScopeValue::Key(RecordId(3)))]
        );
    }

    #[test]
    fn nested_path_through_plain_value_fails() {
        let err = resolve_scope_lookups("slug", &paths(&["title__name"]), &article()).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(msg) if msg.contains("title__name")));
    }

    #[test]
    fn empty_optional_attribute_drops_only_its_constraint() {
        let lookups =
            resolve_scope_lookups("slug", &paths(&["editor", "author"]), &article()).unwrap();
        assert_eq!(lookups, vec![ScopeLookup::new("author", ScopeValue::Key(RecordId(7)))]);
    }

    #[test]
    fn empty_required_attribute_is_missing_dependency() {
        let err = resolve_scope_lookups("slug", &paths(&["category"]), &article()).unwrap_err();
        assert!(matches!(err, DomainError::MissingDependency(_)));

        let err = resolve_scope_lookups("slug", &paths(&["rank"]), &article()).unwrap_err();
        assert!(matches!(err, DomainError::MissingDependency(_)));
    }

    #[test]
    fn self_reference_and_unknown_attribute_are_rejected() {
        let err = resolve_scope_lookups("slug", &paths(&["slug"]), &article()).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(msg) if msg.contains("itself")));

        let err = resolve_scope_lookups("slug", &paths(&["nope"]), &article()).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(msg) if msg.contains("Article.nope")));
    }
}
