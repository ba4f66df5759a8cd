// src/application/commands/slugs/pre_save.rs
use super::SlugCommandService;
use crate::{
    application::{dto::SlugAssignment, error::ApplicationResult},
    domain::slug::{
        BlankKind, Population, Record, RecordMut, SlugConfig, SlugEvent, resolve_candidates,
    },
};

impl SlugCommandService {
    /// Computes the slug a record should be saved with.
    ///
    /// Configuration and missing-dependency errors abort; population problems
    /// degrade to a fallback reported in the returned `population`.
    ///
    /// # Errors
    ///
    /// Fails when the uniqueness scope cannot be resolved, the rival lookup
    /// fails or the suffix space is exhausted.
    pub async fn pre_save(
        &self,
        config: &SlugConfig,
        record: &dyn Record,
    ) -> ApplicationResult<SlugAssignment> {
        let resolution = resolve_candidates(config, record);
        let mut events = Vec::new();

        if resolution.population.is_fallback() {
            events.push(SlugEvent::PopulationFallback {
                model: record.model_name().to_string(),
                field: config.field_name().to_string(),
                population: resolution.population,
            });
        }

        let value = match resolution.population {
            Population::Blanked(BlankKind::Null) | Population::Failed => None,
            Population::Blanked(BlankKind::Empty) => Some(String::new()),
            Population::Populated | Population::DefaultedTo(_) if config.checks_uniqueness() => {
                let unique = self
                    .slug_service
                    .generate_unique_slug(config, record, &resolution.candidates)
                    .await?;
                events.extend(unique.collisions);
                Some(unique.slug)
            }
            Population::Populated | Population::DefaultedTo(_) => {
                resolution.candidates.into_iter().next()
            }
        };

        Ok(SlugAssignment {
            field: config.field_name().to_string(),
            value,
            population: resolution.population,
            events,
        })
    }

    /// Runs [`pre_save`](Self::pre_save) and stores the result on the record.
    ///
    /// # Errors
    ///
    /// Same as [`pre_save`](Self::pre_save); the record is left untouched.
    pub async fn assign<R>(&self, config: &SlugConfig, record: &mut R) -> ApplicationResult<SlugAssignment>
    where
        R: RecordMut,
    {
        let assignment = self.pre_save(config, &*record).await?;
        assignment.apply_to(record);
        Ok(assignment)
    }
}
