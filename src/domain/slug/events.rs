use crate::domain::slug::repository::Rival;
use crate::domain::slug::value_objects::RecordId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultReason {
    StaticDefault,
    ModelName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankKind {
    Empty,
    Null,
}

/// How the slug candidates of one save were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Population {
    Populated,
    DefaultedTo(DefaultReason),
    Blanked(BlankKind),
    Failed,
}

impl Population {
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        !matches!(self, Self::Populated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SlugEvent {
    PopulationFallback {
        model: String,
        field: String,
        population: Population,
    },
    Collision {
        model: String,
        field: String,
        record: Option<RecordId>,
        slug: String,
        rivals: Vec<Rival>,
    },
}
