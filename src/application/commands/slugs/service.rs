// src/application/commands/slugs/service.rs
use std::sync::Arc;

use crate::domain::slug::{SlugService, SlugWriteRepository};

pub const DEFAULT_SAVE_RETRIES: u32 = 3;

pub struct SlugCommandService {
    pub(super) slug_service: Arc<SlugService>,
    pub(super) write_repo: Arc<dyn SlugWriteRepository>,
    pub(super) save_retries: u32,
}

impl SlugCommandService {
    #[must_use]
    pub const fn new(slug_service: Arc<SlugService>, write_repo: Arc<dyn SlugWriteRepository>) -> Self {
        Self {
            slug_service,
            write_repo,
            save_retries: DEFAULT_SAVE_RETRIES,
        }
    }

    /// Number of attempts `save_with_retry` makes before reporting a conflict.
    #[must_use]
    pub fn with_save_retries(mut self, attempts: u32) -> Self {
        self.save_retries = attempts.max(1);
        self
    }
}
