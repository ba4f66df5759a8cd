// src/config.rs
use std::{env, sync::Arc};

use serde::Deserialize;
use thiserror::Error;

use crate::application::commands::slugs::DEFAULT_SAVE_RETRIES;
use crate::application::ports::SlugGeneratorPort;
use crate::domain::slug::SlugConfigBuilder;
use crate::domain::slug::config::{DEFAULT_MAX_LENGTH, SLUG_INDEX_SEPARATOR, SlugConfig};
use crate::infrastructure::util::{DefaultSlugGenerator, UnderscoreSlugGenerator};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugifyStrategy {
    #[default]
    Ascii,
    Underscore,
}

impl SlugifyStrategy {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "ascii" | "default" => Ok(Self::Ascii),
            "underscore" => Ok(Self::Underscore),
            other => Err(ConfigError::Invalid(format!(
                "AUTOSLUG_SLUGIFY must be `ascii` or `underscore`, got `{other}`"
            ))),
        }
    }

    #[must_use]
    pub fn generator(self) -> Arc<SlugGeneratorPort> {
        match self {
            Self::Ascii => Arc::new(DefaultSlugGenerator),
            Self::Underscore => Arc::new(UnderscoreSlugGenerator),
        }
    }
}

/// Process-wide defaults applied to every slug field built from them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SlugSettings {
    index_separator: String,
    max_length: usize,
    unique_warning: bool,
    slugify: SlugifyStrategy,
    save_retries: u32,
}

impl Default for SlugSettings {
    fn default() -> Self {
        Self {
            index_separator: SLUG_INDEX_SEPARATOR.into(),
            max_length: DEFAULT_MAX_LENGTH,
            unique_warning: true,
            slugify: SlugifyStrategy::default(),
            save_retries: DEFAULT_SAVE_RETRIES,
        }
    }
}

impl SlugSettings {
    /// Build settings from `AUTOSLUG_*` environment variables, falling back to
    /// the defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when `AUTOSLUG_MAX_LENGTH` is not a
    /// positive number or `AUTOSLUG_SLUGIFY` names an unknown strategy.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let index_separator =
            env::var("AUTOSLUG_INDEX_SEPARATOR").unwrap_or(defaults.index_separator);

        let max_length = match env::var("AUTOSLUG_MAX_LENGTH") {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!("AUTOSLUG_MAX_LENGTH must be a number, got `{raw}`"))
            })?,
            Err(_) => defaults.max_length,
        };
        if max_length == 0 {
            return Err(ConfigError::Invalid(
                "AUTOSLUG_MAX_LENGTH must be positive".into(),
            ));
        }

        let unique_warning = env::var("AUTOSLUG_UNIQUE_WARNING").map_or(
            defaults.unique_warning,
            |v| v == "1" || v.eq_ignore_ascii_case("true"),
        );

        let slugify = match env::var("AUTOSLUG_SLUGIFY") {
            Ok(raw) => SlugifyStrategy::parse(&raw)?,
            Err(_) => defaults.slugify,
        };

        let save_retries = env::var("AUTOSLUG_SAVE_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.save_retries);

        Ok(Self {
            index_separator,
            max_length,
            unique_warning,
            slugify,
            save_retries,
        })
    }

    #[must_use]
    pub fn index_separator(&self) -> &str {
        &self.index_separator
    }

    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    #[must_use]
    pub const fn unique_warning(&self) -> bool {
        self.unique_warning
    }

    #[must_use]
    pub const fn slugify(&self) -> SlugifyStrategy {
        self.slugify
    }

    #[must_use]
    pub const fn save_retries(&self) -> u32 {
        self.save_retries
    }

    /// A slug field builder seeded with these defaults.
    pub fn slug_config(&self, field_name: impl Into<String>) -> SlugConfigBuilder {
        SlugConfig::builder(field_name)
            .separator(self.index_separator.clone())
            .max_length(self.max_length)
            .warn_on_collision(self.unique_warning)
            .slugify(self.slugify.generator())
    }
}
