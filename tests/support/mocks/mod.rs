// tests/support/mocks/mod.rs
pub mod rivals;
pub mod util;
pub mod writers;

pub use rivals::{InMemoryRivals, StoredRecord};
pub use util::{DummySlug, fixed_pub_date};
pub use writers::RacingWriter;
