// tests/support/mocks/writers.rs
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use autoslug::domain::errors::{DomainError, DomainResult};
use autoslug::domain::slug::{RecordId, SlugWriteRepository};

use super::rivals::{InMemoryRivals, StoredRecord};

/// Simulates another save committing the same slug first: the next
/// `conflicts` writes lose the race and the winner becomes visible as a rival.
pub struct RacingWriter {
    rivals: Arc<InMemoryRivals>,
    conflicts: Mutex<u32>,
    next_rival_id: Mutex<i64>,
    writes: Mutex<Vec<Option<String>>>,
}

impl RacingWriter {
    pub fn new(rivals: Arc<InMemoryRivals>, conflicts: u32) -> Self {
        Self {
            rivals,
            conflicts: Mutex::new(conflicts),
            next_rival_id: Mutex::new(900),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<Option<String>> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SlugWriteRepository for RacingWriter {
    async fn write_slug(
        &self,
        scope: &str,
        _id: RecordId,
        field: &str,
        slug: Option<&str>,
    ) -> DomainResult<()> {
        {
            let mut conflicts = self.conflicts.lock().unwrap();
            if *conflicts > 0 {
                *conflicts -= 1;
                let mut next_id = self.next_rival_id.lock().unwrap();
                *next_id += 1;
                let mut winner = StoredRecord::new(scope, *next_id);
                if let Some(slug) = slug {
                    winner = winner.with(field, slug);
                }
                self.rivals.insert(winner);
                return Err(DomainError::Conflict("UNIQUE constraint failed".into()));
            }
        }

        self.writes.lock().unwrap().push(slug.map(str::to_string));
        Ok(())
    }
}
