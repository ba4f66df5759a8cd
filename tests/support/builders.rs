// tests/support/builders.rs
use autoslug::domain::slug::{FieldKind, FieldValue, RecordSnapshot};

use super::mocks::fixed_pub_date;

pub struct ArticleBuilder {
    id: Option<i64>,
    title: String,
    subtitle: String,
    slug: String,
    author: FieldValue,
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: "Test Article".into(),
            subtitle: String::new(),
            slug: String::new(),
            author: FieldValue::Null,
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn author(mut self, id: i64, name: &str) -> Self {
        let author = RecordSnapshot::builder("User")
            .id(id)
            .label(name)
            .field("name", FieldKind::Text, name)
            .build();
        self.author = FieldValue::record(author);
        self
    }

    pub fn build(self) -> RecordSnapshot {
        let mut builder = RecordSnapshot::builder("Article")
            .field("title", FieldKind::Text, self.title)
            .field("subtitle", FieldKind::Text, self.subtitle)
            .field("pub_date", FieldKind::Date, fixed_pub_date())
            .optional_field("author", FieldKind::Relation, self.author)
            .field("slug", FieldKind::Slug, self.slug);
        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        builder.build()
    }
}
