//! Unique, URL-safe slugs for database records.
//!
//! A [`SlugConfig`](domain::slug::SlugConfig) describes one slug field: where
//! its value is populated from, how it is normalized, and the scope in which it
//! has to be unique. [`SlugCommandService`](application::commands::slugs::SlugCommandService)
//! runs the per-save pipeline against any [`Record`](domain::slug::Record) and
//! a [`RivalRepository`](domain::slug::RivalRepository) that can look up
//! records sharing a slug.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
