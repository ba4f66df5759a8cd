// src/domain/slug/services/mod.rs
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::config::SlugConfig;
use crate::domain::slug::events::SlugEvent;
use crate::domain::slug::record::Record;
use crate::domain::slug::repository::{RivalQuery, RivalRepository};
use crate::domain::slug::scope::{ScopeLookup, resolve_scope_lookups};
use crate::domain::slug::value_objects::{char_len, crop};

/// A slug free within its scope, with the collisions met on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueSlug {
    pub slug: String,
    pub collisions: Vec<SlugEvent>,
}

/// Domain service responsible for producing unique slugs.
///
/// Every unsuffixed candidate is tried first, in order. Only when all of them
/// are taken is the first candidate suffixed (`-2`, `-3`, ...) until free, the
/// base being cropped so that separator and digits always fit in `max_length`.
/// When the suffix alone fills `max_length` the slug is the suffix itself.
///
/// This is check-then-act: two concurrent saves can both see a slug as free.
/// Back the slug column with a unique index and retry on conflict (see
/// `SlugCommandService::save_with_retry`).
pub struct SlugService {
    rivals: Arc<dyn RivalRepository>,
}

impl SlugService {
    #[must_use]
    pub const fn new(rivals: Arc<dyn RivalRepository>) -> Self {
        Self { rivals }
    }

    /// Finds the first free slug for `record` among `candidates`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when `candidates` is empty, scope resolution errors
    /// (`Configuration`, `MissingDependency`), repository errors, and
    /// `Exhausted` once the suffix no longer fits in `max_length`.
    pub async fn generate_unique_slug(
        &self,
        config: &SlugConfig,
        record: &dyn Record,
        candidates: &[String],
    ) -> DomainResult<UniqueSlug> {
        let first = candidates.first().ok_or_else(|| {
            DomainError::Validation(format!(
                "no slug candidates for {}.{}",
                record.model_name(),
                config.field_name()
            ))
        })?;

        let scope = resolve_scope_lookups(config.field_name(), config.unique_with(), record)?;
        let max_length = config.max_length();
        let mut collisions = Vec::new();

        for candidate in candidates {
            let slug = crop(candidate, max_length);
            if self
                .is_free(config, record, &scope, &slug, &mut collisions)
                .await?
            {
                return Ok(UniqueSlug { slug, collisions });
            }
        }

        let mut base = crop(first, max_length);
        let mut index: u64 = 1;
        loop {
            index = index.checked_add(1).ok_or_else(|| exhausted(config, record))?;
            let tail = format!("{}{index}", config.index_separator());
            let tail_length = char_len(&tail);
            if tail_length > max_length {
                return Err(exhausted(config, record));
            }
            if char_len(&base) + tail_length > max_length {
                base = crop(&base, max_length - tail_length);
            }

            let slug = format!("{base}{tail}");
            if self
                .is_free(config, record, &scope, &slug, &mut collisions)
                .await?
            {
                return Ok(UniqueSlug { slug, collisions });
            }
        }
    }

    async fn is_free(
        &self,
        config: &SlugConfig,
        record: &dyn Record,
        scope: &[ScopeLookup],
        slug: &str,
        collisions: &mut Vec<SlugEvent>,
    ) -> DomainResult<bool> {
        let mut lookups = scope.to_vec();
        lookups.push(ScopeLookup::new(config.field_name(), slug));
        let query = RivalQuery {
            scope: config.query_scope(record).to_string(),
            lookups,
            exclude: record.primary_key(),
        };

        let rivals = self.rivals.find_rivals(&query).await?;
        tracing::debug!(scope = %query.scope, slug, rivals = rivals.len(), "checked slug");
        if rivals.is_empty() {
            return Ok(true);
        }

        if config.warn_on_collision() {
            let names = rivals
                .iter()
                .map(|rival| format!("'{}: {}'", rival.id, rival.label))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                model = record.model_name(),
                field = config.field_name(),
                record = ?record.primary_key(),
                slug,
                "slug is already used in {names}, adding an index"
            );
        }

        collisions.push(SlugEvent::Collision {
            model: record.model_name().to_string(),
            field: config.field_name().to_string(),
            record: record.primary_key(),
            slug: slug.to_string(),
            rivals,
        });
        Ok(false)
    }
}

fn exhausted(config: &SlugConfig, record: &dyn Record) -> DomainError {
    DomainError::Exhausted(format!(
        "no unique slug for {}.{} fits in {} characters",
        record.model_name(),
        config.field_name(),
        config.max_length()
    ))
}
