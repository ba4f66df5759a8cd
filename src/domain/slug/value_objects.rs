use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Length in characters, which is the unit `max_length` is expressed in.
#[must_use]
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Hard truncation to at most `max_length` characters.
#[must_use]
pub fn crop(value: &str, max_length: usize) -> String {
    value.char_indices().nth(max_length).map_or_else(
        || value.to_string(),
        |(end, _)| value[..end].to_string(),
    )
}
