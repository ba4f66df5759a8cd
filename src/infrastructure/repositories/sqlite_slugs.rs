use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::error::map_sqlx;
use super::mappings::{SqliteMappings, quote};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{RecordId, SlugWriteRepository};

#[derive(Clone)]
pub struct SqliteSlugWriteRepository {
    pool: Arc<SqlitePool>,
    mappings: Arc<SqliteMappings>,
}

impl SqliteSlugWriteRepository {
    #[must_use]
    pub const fn new(pool: Arc<SqlitePool>, mappings: Arc<SqliteMappings>) -> Self {
        Self { pool, mappings }
    }
}

#[async_trait]
impl SlugWriteRepository for SqliteSlugWriteRepository {
    async fn write_slug(
        &self,
        scope: &str,
        id: RecordId,
        field: &str,
        slug: Option<&str>,
    ) -> DomainResult<()> {
        let mapping = self.mappings.get(scope)?;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE ");
        builder.push(quote(&mapping.table));
        builder.push(" SET ");
        builder.push(quote(mapping.column_for(field)));
        builder.push(" = ");
        builder.push_bind(slug.map(str::to_string));
        builder.push(" WHERE ");
        builder.push(quote(&mapping.primary_key));
        builder.push(" = ");
        builder.push_bind(i64::from(id));

        let result = builder
            .build()
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Persistence(format!(
                "no {scope} record with id {id}"
            )));
        }
        Ok(())
    }
}
