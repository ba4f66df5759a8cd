// src/application/commands/slugs/save.rs
use super::SlugCommandService;
use crate::{
    application::{
        dto::SlugAssignment,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        slug::{RecordMut, SlugConfig},
    },
};

impl SlugCommandService {
    /// Assigns a slug and persists it, recomputing when the store's unique
    /// index rejects a slug that another save committed in the meantime.
    ///
    /// # Errors
    ///
    /// `Validation` for an unsaved record, `Conflict` once every attempt was
    /// rejected, and any error from [`assign`](Self::assign) or the writer.
    pub async fn save_with_retry<R>(
        &self,
        config: &SlugConfig,
        record: &mut R,
    ) -> ApplicationResult<SlugAssignment>
    where
        R: RecordMut,
    {
        let id = record.primary_key().ok_or_else(|| {
            ApplicationError::validation(format!(
                "{} must be saved before its slug can be persisted",
                record.model_name()
            ))
        })?;
        let table = record.model_name().to_string();

        let mut attempt = 0;
        loop {
            attempt += 1;
            let assignment = self.assign(config, record).await?;

            match self
                .write_repo
                .write_slug(&table, id, config.field_name(), assignment.value())
                .await
            {
                Ok(()) => return Ok(assignment),
                Err(DomainError::Conflict(msg)) if attempt < self.save_retries => {
                    tracing::info!(
                        model = %table,
                        field = config.field_name(),
                        attempt,
                        slug = ?assignment.value(),
                        "slug taken at commit time, recomputing: {msg}"
                    );
                }
                Err(DomainError::Conflict(msg)) => return Err(ApplicationError::conflict(msg)),
                Err(err) => return Err(err.into()),
            }
        }
    }
}
