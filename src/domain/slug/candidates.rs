use crate::domain::slug::config::{PopulateFrom, SlugConfig};
use crate::domain::slug::events::{BlankKind, DefaultReason, Population};
use crate::domain::slug::record::Record;
use crate::domain::slug::value_objects::crop;

/// Slug-safe candidates in preference order, plus how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateResolution {
    pub candidates: Vec<String>,
    pub population: Population,
}

/// Turns the field's current value or its `populate_from` source into
/// slugified, cropped candidates.
///
/// A non-empty current value is kept as the only candidate unless
/// `always_update` is set. When nothing usable remains the fallback chain
/// applies: static default, then blank/null, then the lowercased model name.
#[must_use]
pub fn resolve_candidates(config: &SlugConfig, record: &dyn Record) -> CandidateResolution {
    let current = record.value(config.field_name()).as_candidate();

    let raw = match config.populate_from() {
        Some(source) if config.always_update() || current.is_none() => {
            prepopulated_values(source, record)
        }
        _ => current.into_iter().collect(),
    };

    let candidates = normalize(config, raw);
    if candidates.is_empty() {
        return fallback(config, record);
    }

    CandidateResolution {
        candidates,
        population: Population::Populated,
    }
}

fn prepopulated_values(source: &PopulateFrom, record: &dyn Record) -> Vec<String> {
    match source {
        PopulateFrom::SingleAttribute(name) => {
            record.value(name).as_candidate().into_iter().collect()
        }
        PopulateFrom::AttributeList(names) => names
            .iter()
            .filter_map(|name| record.value(name).as_candidate())
            .collect(),
        PopulateFrom::Computed(source) => source(record).into_vec(),
    }
}

fn normalize(config: &SlugConfig, raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .filter(|value| !value.is_empty())
        .map(|value| crop(&config.slugify(&value), config.max_length()))
        .filter(|slug| !slug.is_empty())
        .collect()
}

fn fallback(config: &SlugConfig, record: &dyn Record) -> CandidateResolution {
    let model = record.model_name();
    let field = config.field_name();

    if let Some(default) = config.default_value() {
        let candidates = normalize(config, vec![default.to_string()]);
        if !candidates.is_empty() {
            tracing::warn!(model, field, "failed to populate slug, using the static default");
            return CandidateResolution {
                candidates,
                population: Population::DefaultedTo(DefaultReason::StaticDefault),
            };
        }
    }

    if config.blank() {
        let kind = if config.null() {
            BlankKind::Null
        } else {
            BlankKind::Empty
        };
        tracing::warn!(model, field, ?kind, "failed to populate slug, leaving it blank");
        return CandidateResolution {
            candidates: Vec::new(),
            population: Population::Blanked(kind),
        };
    }

    let candidates = normalize(config, vec![model.to_lowercase()]);
    if candidates.is_empty() {
        tracing::warn!(model, field, "failed to populate slug");
        return CandidateResolution {
            candidates,
            population: Population::Failed,
        };
    }

    tracing::warn!(model, field, "failed to populate slug, using the model name");
    CandidateResolution {
        candidates,
        population: Population::DefaultedTo(DefaultReason::ModelName),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::record::{FieldKind, FieldValue, RecordSnapshot};

    fn book(slug: &str, title: &str) -> RecordSnapshot {
        RecordSnapshot::builder("Book")
            .id(3)
            .field("title", FieldKind::Text, title)
            .field("subtitle", FieldKind::Text, "Second Edition")
            .optional_field("isbn", FieldKind::Text, FieldValue::Null)
            .field(
                "shout",
                FieldKind::Text,
                FieldValue::method(|| FieldValue::Text("LOUD TITLE".into())),
            )
            .field("slug", FieldKind::Slug, slug)
            .build()
    }

    fn config() -> crate::domain::slug::config::SlugConfigBuilder {
        SlugConfig::builder("slug")
    }

    #[test]
    fn existing_value_is_kept_without_always_update() {
        let config = config().populate_from_attribute("title").build().unwrap();
        let resolution = resolve_candidates(&config, &book("kept-slug", "New Title"));
        assert_eq!(resolution.candidates, vec!["kept-slug"]);
        assert_eq!(resolution.population, Population::Populated);
    }

    #[test]
    fn always_update_recomputes_from_source() {
        let config = config()
            .populate_from_attribute("title")
            .always_update(true)
            .build()
            .unwrap();
        let resolution = resolve_candidates(&config, &book("kept-slug", "New Title"));
        assert_eq!(resolution.candidates, vec!["new-title"]);
    }

    #[test]
    fn attribute_list_skips_empty_values_in_order() {
        let config = config()
            .populate_from_attributes(["isbn", "title", "subtitle"])
            .build()
            .unwrap();
        let resolution = resolve_candidates(&config, &book("", "Dune"));
        assert_eq!(resolution.candidates, vec!["dune", "second-edition"]);
    }

    #[test]
    fn accessor_attributes_are_invoked() {
        let config = config().populate_from_attribute("shout").build().unwrap();
        let resolution = resolve_candidates(&config, &book("", "Dune"));
        assert_eq!(resolution.candidates, vec!["loud-title"]);
    }

    #[test]
    fn computed_source_accepts_one_or_many() {
        let one = config()
            .populate_from_fn(|record: &dyn Record| format!("{} book", record.model_name()))
            .build()
            .unwrap();
        assert_eq!(resolve_candidates(&one, &book("", "x")).candidates, vec!["book-book"]);

        let many = config()
            .populate_from_fn(|_: &dyn Record| vec!["", "Alpha", "Beta"])
            .build()
            .unwrap();
        assert_eq!(
            resolve_candidates(&many, &book("", "x")).candidates,
            vec!["alpha", "beta"]
        );
    }

    #[test]
    fn candidates_are_cropped() {
        let config = config()
            .populate_from_attribute("title")
            .max_length(8)
            .build()
            .unwrap();
        let resolution = resolve_candidates(&config, &book("", "abcdefghij"));
        assert_eq!(resolution.candidates, vec!["abcdefgh"]);
    }

    #[test]
    fn fallback_chain_is_observable() {
        let with_default = config()
            .populate_from_attribute("isbn")
            .default_value("Untitled")
            .build()
            .unwrap();
        let resolution = resolve_candidates(&with_default, &book("", "x"));
        assert_eq!(resolution.candidates, vec!["untitled"]);
        assert_eq!(
            resolution.population,
            Population::DefaultedTo(DefaultReason::StaticDefault)
        );

        let blank_null = config()
            .populate_from_attribute("isbn")
            .blank(true)
            .null(true)
            .build()
            .unwrap();
        let resolution = resolve_candidates(&blank_null, &book("", "x"));
        assert!(resolution.candidates.is_empty());
        assert_eq!(resolution.population, Population::Blanked(BlankKind::Null));

        let blank = config().populate_from_attribute("isbn").blank(true).build().unwrap();
        assert_eq!(
            resolve_candidates(&blank, &book("", "x")).population,
            Population::Blanked(BlankKind::Empty)
        );

        let model_name = config().populate_from_attribute("isbn").build().unwrap();
        let resolution = resolve_candidates(&model_name, &book("", "x"));
        assert_eq!(resolution.candidates, vec!["book"]);
        assert_eq!(
            resolution.population,
            Population::DefaultedTo(DefaultReason::ModelName)
        );
    }

    #[test]
    fn unsluggable_candidates_fall_back() {
        let config = config().populate_from_attribute("title").build().unwrap();
        let resolution = resolve_candidates(&config, &book("", "!!!"));
        assert_eq!(resolution.candidates, vec!["book"]);
        assert!(resolution.population.is_fallback());
    }
}
