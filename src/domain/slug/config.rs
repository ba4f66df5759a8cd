use std::fmt;
use std::sync::Arc;

use crate::application::ports::SlugGeneratorPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::record::Record;
use crate::domain::slug::scope::ScopePath;
use crate::infrastructure::util::DefaultSlugGenerator;

/// The "-" in "foo-2".
pub const SLUG_INDEX_SEPARATOR: &str = "-";
pub const DEFAULT_MAX_LENGTH: usize = 50;

/// What a computed `populate_from` source returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputedValue {
    One(String),
    Many(Vec<String>),
}

impl ComputedValue {
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

impl From<String> for ComputedValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&str> for ComputedValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for ComputedValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for ComputedValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

pub type PopulateFn = Arc<dyn Fn(&dyn Record) -> ComputedValue + Send + Sync>;

/// Where slug candidates come from.
#[derive(Clone)]
pub enum PopulateFrom {
    SingleAttribute(String),
    /// Attributes in order of preference.
    AttributeList(Vec<String>),
    Computed(PopulateFn),
}

impl PopulateFrom {
    pub fn computed<F, R>(source: F) -> Self
    where
        F: Fn(&dyn Record) -> R + Send + Sync + 'static,
        R: Into<ComputedValue>,
    {
        Self::Computed(Arc::new(move |record: &dyn Record| -> ComputedValue {
            source(record).into()
        }))
    }
}

impl fmt::Debug for PopulateFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleAttribute(name) => {
                f.debug_tuple("SingleAttribute").field(name).finish()
            }
            Self::AttributeList(names) => {
                f.debug_tuple("AttributeList").field(names).finish()
            }
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Per-field slug configuration. Built once and shared for the life of the process.
#[derive(Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct SlugConfig {
    field_name: String,
    populate_from: Option<PopulateFrom>,
    unique: bool,
    unique_with: Vec<ScopePath>,
    index_separator: String,
    max_length: usize,
    always_update: bool,
    slugify: Arc<SlugGeneratorPort>,
    warn_on_collision: bool,
    default: Option<String>,
    blank: bool,
    null: bool,
    manager: Option<String>,
}

impl SlugConfig {
    pub fn builder(field_name: impl Into<String>) -> SlugConfigBuilder {
        SlugConfigBuilder::new(field_name)
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub const fn populate_from(&self) -> Option<&PopulateFrom> {
        self.populate_from.as_ref()
    }

    /// Global uniqueness; a non-empty `unique_with` supersedes it.
    #[must_use]
    pub const fn unique(&self) -> bool {
        self.unique && self.unique_with.is_empty()
    }

    #[must_use]
    pub fn unique_with(&self) -> &[ScopePath] {
        &self.unique_with
    }

    /// Whether saving must look for rivals at all.
    #[must_use]
    pub const fn checks_uniqueness(&self) -> bool {
        self.unique || !self.unique_with.is_empty()
    }

    pub fn index_separator(&self) -> &str {
        &self.index_separator
    }

    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    #[must_use]
    pub const fn always_update(&self) -> bool {
        self.always_update
    }

    #[must_use]
    pub fn slugify(&self, input: &str) -> String {
        self.slugify.slugify(input)
    }

    #[must_use]
    pub const fn warn_on_collision(&self) -> bool {
        self.warn_on_collision
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    #[must_use]
    pub const fn blank(&self) -> bool {
        self.blank
    }

    #[must_use]
    pub const fn null(&self) -> bool {
        self.null
    }

    #[must_use]
    pub fn manager(&self) -> Option<&str> {
        self.manager.as_deref()
    }

    /// Scope in which rivals are searched: the manager override, or the record's own model.
    #[must_use]
    pub fn query_scope<'a>(&'a self, record: &'a dyn Record) -> &'a str {
        self.manager.as_deref().unwrap_or_else(|| record.model_name())
    }
}

impl fmt::Debug for SlugConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugConfig")
            .field("field_name", &self.field_name)
            .field("populate_from", &self.populate_from)
            .field("unique", &self.unique)
            .field("unique_with", &self.unique_with)
            .field("index_separator", &self.index_separator)
            .field("max_length", &self.max_length)
            .field("always_update", &self.always_update)
            .field("warn_on_collision", &self.warn_on_collision)
            .field("default", &self.default)
            .field("blank", &self.blank)
            .field("null", &self.null)
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}

#[must_use]
#[allow(clippy::struct_excessive_bools)]
pub struct SlugConfigBuilder {
    field_name: String,
    populate_from: Option<PopulateFrom>,
    unique: bool,
    unique_with: Vec<String>,
    index_separator: String,
    max_length: usize,
    always_update: bool,
    slugify: Arc<SlugGeneratorPort>,
    warn_on_collision: bool,
    default: Option<String>,
    blank: bool,
    null: bool,
    manager: Option<String>,
}

impl SlugConfigBuilder {
    fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            populate_from: None,
            unique: true,
            unique_with: Vec::new(),
            index_separator: SLUG_INDEX_SEPARATOR.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
            always_update: false,
            slugify: Arc::new(DefaultSlugGenerator),
            warn_on_collision: true,
            default: None,
            blank: false,
            null: false,
            manager: None,
        }
    }

    pub fn populate_from(mut self, source: PopulateFrom) -> Self {
        self.populate_from = Some(source);
        self
    }

    pub fn populate_from_attribute(self, name: impl Into<String>) -> Self {
        self.populate_from(PopulateFrom::SingleAttribute(name.into()))
    }

    pub fn populate_from_attributes<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.populate_from(PopulateFrom::AttributeList(
            names.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn populate_from_fn<F, R>(self, source: F) -> Self
    where
        F: Fn(&dyn Record) -> R + Send + Sync + 'static,
        R: Into<ComputedValue>,
    {
        self.populate_from(PopulateFrom::computed(source))
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Adds one scope path, e.g. `"pub_date__month"` or `"author__name"`.
    pub fn unique_with(mut self, path: impl Into<String>) -> Self {
        self.unique_with.push(path.into());
        self
    }

    #[deprecated(note = "use `unique_with` instead")]
    pub fn unique_with_date(self, path: impl Into<String>) -> Self {
        let path = path.into();
        tracing::warn!(
            field = %self.field_name,
            path = %path,
            "`unique_with_date` is deprecated, use `unique_with` instead"
        );
        self.unique_with(path)
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.index_separator = separator.into();
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn always_update(mut self, always_update: bool) -> Self {
        self.always_update = always_update;
        self
    }

    pub fn slugify(mut self, generator: Arc<SlugGeneratorPort>) -> Self {
        self.slugify = generator;
        self
    }

    pub fn slugify_fn<F>(self, slugify: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.slugify(Arc::new(slugify))
    }

    pub fn warn_on_collision(mut self, warn: bool) -> Self {
        self.warn_on_collision = warn;
        self
    }

    /// Static value used when nothing could be populated.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    pub fn null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    pub fn manager(mut self, scope: impl Into<String>) -> Self {
        self.manager = Some(scope.into());
        self
    }

    /// # Errors
    ///
    /// Returns `DomainError::Configuration` for an empty field name, a zero
    /// `max_length` or a malformed `unique_with` path.
    pub fn build(self) -> DomainResult<SlugConfig> {
        if self.field_name.trim().is_empty() {
            return Err(DomainError::configuration("slug field name cannot be empty"));
        }
        if self.max_length == 0 {
            return Err(DomainError::configuration(format!(
                "max_length of slug field `{}` must be positive",
                self.field_name
            )));
        }

        let unique_with = self
            .unique_with
            .iter()
            .map(|raw| ScopePath::parse(raw))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(SlugConfig {
            field_name: self.field_name,
            populate_from: self.populate_from,
            unique: self.unique,
            unique_with,
            index_separator: self.index_separator,
            max_length: self.max_length,
            always_update: self.always_update,
            slugify: self.slugify,
            warn_on_collision: self.warn_on_collision,
            default: self.default,
            blank: self.blank,
            null: self.null,
            manager: self.manager,
        })
    }
}
