pub mod candidates;
pub mod config;
pub mod events;
pub mod record;
pub mod repository;
pub mod scope;
pub mod services;
pub mod value_objects;

pub use candidates::{CandidateResolution, resolve_candidates};
pub use config::{ComputedValue, PopulateFrom, SlugConfig, SlugConfigBuilder};
pub use events::{BlankKind, DefaultReason, Population, SlugEvent};
pub use record::{FieldKind, FieldMeta, FieldValue, Record, RecordMut, RecordSnapshot};
pub use repository::{Rival, RivalQuery, RivalRepository, SlugWriteRepository};
pub use scope::{DatePart, ScopeLookup, ScopePath, ScopeValue, resolve_scope_lookups};
pub use services::{SlugService, UniqueSlug};
pub use value_objects::RecordId;
