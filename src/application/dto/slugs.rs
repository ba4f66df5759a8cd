use crate::domain::slug::{FieldValue, Population, RecordMut, SlugEvent};
use serde::Serialize;

/// Result of running the slug pipeline for one save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugAssignment {
    pub field: String,
    /// `None` stores null; `Some("")` stores a blank slug.
    pub value: Option<String>,
    pub population: Population,
    pub events: Vec<SlugEvent>,
}

impl SlugAssignment {
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn collisions(&self) -> impl Iterator<Item = &SlugEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, SlugEvent::Collision { .. }))
    }

    /// Writes the computed value back onto the record.
    pub fn apply_to<R: RecordMut + ?Sized>(&self, record: &mut R) {
        let value = self.value.clone().map_or(FieldValue::Null, FieldValue::Text);
        record.set_value(&self.field, value);
    }
}
