use crate::domain::errors::DomainResult;
use crate::domain::slug::scope::{ScopeLookup, ScopeValue};
use crate::domain::slug::value_objects::RecordId;
use async_trait::async_trait;
use serde::Serialize;

/// Exact-match constraints a rival must satisfy, minus the record being saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RivalQuery {
    pub scope: String,
    pub lookups: Vec<ScopeLookup>,
    pub exclude: Option<RecordId>,
}

impl RivalQuery {
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&ScopeValue> {
        self.lookups
            .iter()
            .find(|lookup| lookup.key == key)
            .map(|lookup| &lookup.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rival {
    pub id: RecordId,
    pub label: String,
}

#[async_trait]
pub trait RivalRepository: Send + Sync {
    /// Records in `query.scope` matching every lookup, except `query.exclude`.
    ///
    /// # Errors
    ///
    /// Surfaces store failures as `DomainError::Persistence`.
    async fn find_rivals(&self, query: &RivalQuery) -> DomainResult<Vec<Rival>>;
}

#[async_trait]
pub trait SlugWriteRepository: Send + Sync {
    /// Persists the slug column of one record. A unique index hit must surface
    /// as `DomainError::Conflict`.
    ///
    /// # Errors
    ///
    /// `Conflict` on a unique index hit, `Persistence` otherwise.
    async fn write_slug(
        &self,
        scope: &str,
        id: RecordId,
        field: &str,
        slug: Option<&str>,
    ) -> DomainResult<()>;
}
