// tests/support/mocks/rivals.rs
use std::sync::Mutex;

use async_trait::async_trait;

use autoslug::domain::errors::DomainResult;
use autoslug::domain::slug::{RecordId, Rival, RivalQuery, RivalRepository, ScopeValue};

/// A stored record as the rival lookup sees it: flat lookup keys to values.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub scope: String,
    pub id: i64,
    pub label: String,
    pub fields: Vec<(String, ScopeValue)>,
}

impl StoredRecord {
    pub fn new(scope: &str, id: i64) -> Self {
        Self {
            scope: scope.into(),
            id,
            label: format!("{scope} #{id}"),
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<ScopeValue>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    fn matches(&self, query: &RivalQuery) -> bool {
        self.scope == query.scope
            && query.exclude != Some(RecordId(self.id))
            && query.lookups.iter().all(|lookup| {
                self.fields
                    .iter()
                    .any(|(key, value)| *key == lookup.key && *value == lookup.value)
            })
    }
}

#[derive(Default)]
pub struct InMemoryRivals {
    records: Mutex<Vec<StoredRecord>>,
    queries: Mutex<Vec<RivalQuery>>,
}

impl InMemoryRivals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, record: StoredRecord) -> Self {
        self.insert(record);
        self
    }

    pub fn insert(&self, record: StoredRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn queries(&self) -> Vec<RivalQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn queried_slugs(&self, field: &str) -> Vec<String> {
        self.queries()
            .iter()
            .filter_map(|query| match query.lookup(field) {
                Some(ScopeValue::Text(slug)) => Some(slug.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl RivalRepository for InMemoryRivals {
    async fn find_rivals(&self, query: &RivalQuery) -> DomainResult<Vec<Rival>> {
        self.queries.lock().unwrap().push(query.clone());
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|record| record.matches(query))
            .map(|record| Rival {
                id: RecordId(record.id),
                label: record.label.clone(),
            })
            .collect())
    }
}
