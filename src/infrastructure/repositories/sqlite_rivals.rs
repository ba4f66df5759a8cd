use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::error::map_sqlx;
use super::mappings::{SqliteMappings, TableMapping, quote};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::scope::{DatePart, LOOKUP_SEP};
use crate::domain::slug::{RecordId, Rival, RivalQuery, RivalRepository, ScopeValue};

/// Answers rival queries with a single `SELECT` per candidate slug.
///
/// Lookup keys are read segment by segment: a relation segment becomes an
/// `IN (SELECT ...)` over the related table, a trailing `year`/`month`/`day`
/// after a column compares the matching `strftime` component, and anything
/// else is plain column equality.
#[derive(Clone)]
pub struct SqliteRivalRepository {
    pool: Arc<SqlitePool>,
    mappings: Arc<SqliteMappings>,
}

impl SqliteRivalRepository {
    #[must_use]
    pub const fn new(pool: Arc<SqlitePool>, mappings: Arc<SqliteMappings>) -> Self {
        Self { pool, mappings }
    }

    fn push_condition(
        &self,
        builder: &mut QueryBuilder<'_, Sqlite>,
        mapping: &TableMapping,
        segments: &[&str],
        value: &ScopeValue,
    ) -> DomainResult<()> {
        let Some((head, rest)) = segments.split_first() else {
            return Err(DomainError::Persistence("empty lookup key".into()));
        };

        if let Some(relation) = mapping.relation_for(head) {
            builder.push(quote(&relation.column));
            if rest.is_empty() {
                builder.push(" = ");
                push_value(builder, value);
                return Ok(());
            }

            let target = self.mappings.get(&relation.target)?;
            builder.push(" IN (SELECT ");
            builder.push(quote(&target.primary_key));
            builder.push(" FROM ");
            builder.push(quote(&target.table));
            builder.push(" WHERE ");
            self.push_condition(builder, target, rest, value)?;
            builder.push(")");
            return Ok(());
        }

        let column = quote(mapping.column_for(head));
        match rest {
            [] => {
                builder.push(column);
                builder.push(" = ");
            }
            [part] => {
                let format = match DatePart::parse(part) {
                    Some(DatePart::Year) => "%Y",
                    Some(DatePart::Month) => "%m",
                    Some(DatePart::Day) => "%d",
                    None => return Err(unmapped(mapping, segments)),
                };
                builder.push(format!("CAST(strftime('{format}', {column}) AS INTEGER) = "));
            }
            _ => return Err(unmapped(mapping, segments)),
        }
        push_value(builder, value);
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct RivalRow {
    id: i64,
    label: Option<String>,
}

#[async_trait]
impl RivalRepository for SqliteRivalRepository {
    async fn find_rivals(&self, query: &RivalQuery) -> DomainResult<Vec<Rival>> {
        let mapping = self.mappings.get(&query.scope)?;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
        builder.push(quote(&mapping.primary_key));
        builder.push(" AS id, ");
        let label = mapping.label_column.as_ref().map_or_else(
            || "NULL".to_string(),
            |column| format!("CAST({} AS TEXT)", quote(column)),
        );
        builder.push(label);
        builder.push(" AS label FROM ");
        builder.push(quote(&mapping.table));
        builder.push(" WHERE 1 = 1");

        for lookup in &query.lookups {
            let segments: Vec<&str> = lookup.key.split(LOOKUP_SEP).collect();
            builder.push(" AND ");
            self.push_condition(&mut builder, mapping, &segments, &lookup.value)?;
        }

        if let Some(id) = query.exclude {
            builder.push(" AND ");
            builder.push(quote(&mapping.primary_key));
            builder.push(" <> ");
            builder.push_bind(i64::from(id));
        }

        let rows = builder
            .build_query_as::<RivalRow>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows
            .into_iter()
            .map(|row| Rival {
                id: RecordId(row.id),
                label: row
                    .label
                    .unwrap_or_else(|| format!("{} object ({})", query.scope, row.id)),
            })
            .collect())
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: &ScopeValue) {
    match value {
        ScopeValue::Text(text) => builder.push_bind(text.clone()),
        ScopeValue::Integer(value) => builder.push_bind(*value),
        ScopeValue::Bool(value) => builder.push_bind(*value),
        ScopeValue::Date(date) => builder.push_bind(date.format("%Y-%m-%d").to_string()),
        ScopeValue::DateTime(at) => builder.push_bind(at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ScopeValue::Key(id) => builder.push_bind(i64::from(*id)),
    };
}

fn unmapped(mapping: &TableMapping, segments: &[&str]) -> DomainError {
    DomainError::Persistence(format!(
        "cannot map lookup `{}` onto table `{}`",
        segments.join(LOOKUP_SEP),
        mapping.table
    ))
}
