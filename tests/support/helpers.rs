// tests/support/helpers.rs
use std::sync::{Arc, Once};

use autoslug::application::commands::slugs::SlugCommandService;
use autoslug::domain::slug::{RivalRepository, SlugService, SlugWriteRepository};

use super::mocks::{InMemoryRivals, RacingWriter};

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness; honours `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn slug_service(rivals: Arc<InMemoryRivals>) -> SlugService {
    let rivals: Arc<dyn RivalRepository> = rivals;
    SlugService::new(rivals)
}

/// Command service over in-memory rivals and a writer that loses `conflicts` races.
pub fn command_service(
    rivals: Arc<InMemoryRivals>,
    conflicts: u32,
) -> (SlugCommandService, Arc<RacingWriter>) {
    init_tracing();
    let writer = Arc::new(RacingWriter::new(Arc::clone(&rivals), conflicts));
    let write_repo: Arc<dyn SlugWriteRepository> = writer.clone();
    let service = SlugCommandService::new(Arc::new(slug_service(rivals)), write_repo);
    (service, writer)
}
