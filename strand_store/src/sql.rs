//! sea-orm backed record store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Schema, Set, SqlErr,
};
use strand_core::{Error, Result, StringRecord, StringRecordRepo};
use strand_entities::strings;
use tracing::info;

use crate::convert;

fn is_table_already_exists_error(err: &DbErr) -> bool {
    err.to_string().contains("table") && err.to_string().contains("already exists")
}

/// Record store over any sea-orm connection (SQLite or Postgres).
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    /// Connect and create the `strings` table if it is missing.
    ///
    /// An in-memory SQLite URL is pinned to a single connection so every
    /// query sees the same database.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to database: {}", database_url);

        let mut options = ConnectOptions::new(database_url.to_owned());
        if database_url.contains(":memory:") {
            options.max_connections(1).min_connections(1);
        }
        let db = Database::connect(options).await?;

        let backend = db.get_database_backend();
        let schema = Schema::new(backend);
        let stmt = schema.create_table_from_entity(strings::Entity);
        match db.execute_unprepared(&backend.build(&stmt).to_string()).await {
            Ok(_) => {}
            Err(e) if is_table_already_exists_error(&e) => {
                info!("Table already exists, skipping creation");
            }
            Err(e) => return Err(e.into()),
        }

        info!("SqlStore initialized");
        Ok(Self { db })
    }

    async fn find_model(&self, value: &str) -> Result<Option<strings::Model>> {
        strings::Entity::find()
            .filter(strings::Column::Value.eq(value))
            .one(&self.db)
            .await
            .map_err(Error::storage)
    }
}

#[async_trait]
impl StringRecordRepo for SqlStore {
    async fn insert(&self, record: &StringRecord) -> Result<()> {
        let properties = serde_json::to_string(&record.properties).map_err(Error::storage)?;

        let model = strings::ActiveModel {
            value: Set(record.value.clone()),
            sha256_hash: Set(record.id.clone()),
            properties: Set(properties),
            created_at: Set(record.created_at),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(_) => {
                info!("Inserted string {}", record.id);
                Ok(())
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(Error::Conflict(record.value.clone()))
            }
            Err(e) => Err(Error::storage(e)),
        }
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<StringRecord>> {
        self.find_model(value)
            .await?
            .map(convert::record_from_model)
            .transpose()
            .map_err(Error::Storage)
    }

    async fn list(&self) -> Result<Vec<StringRecord>> {
        let models = strings::Entity::find()
            .order_by_asc(strings::Column::Id)
            .all(&self.db)
            .await
            .map_err(Error::storage)?;

        models
            .into_iter()
            .map(convert::record_from_model)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(Error::Storage)
    }

    async fn delete(&self, value: &str) -> Result<()> {
        let result = strings::Entity::delete_many()
            .filter(strings::Column::Value.eq(value))
            .exec(&self.db)
            .await
            .map_err(Error::storage)?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(value.to_string()));
        }
        info!("Deleted string: {}", value);
        Ok(())
    }
}
