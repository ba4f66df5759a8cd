// src/application/commands/slugs/mod.rs
mod pre_save;
mod save;
mod service;

pub use service::{DEFAULT_SAVE_RETRIES, SlugCommandService};
