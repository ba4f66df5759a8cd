// src/infrastructure/repositories/mod.rs
mod error;
mod mappings;
mod sqlite_rivals;
mod sqlite_slugs;

pub use error::map_sqlx;
pub use mappings::{SqliteMappings, TableMapping};
pub use sqlite_rivals::SqliteRivalRepository;
pub use sqlite_slugs::SqliteSlugWriteRepository;
