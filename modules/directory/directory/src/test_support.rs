#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use directory_sdk::PermissionRecord;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::domain::error::DomainError;
use crate::domain::repos::{PermissionIndex, PermissionsRepository, PutOutcome};
use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    OrmContactsRepository, OrmMembershipsRepository, OrmPermissionsRepository,
};
use crate::module::ConcreteAppServices;

/// Single-connection in-memory `SQLite`; a second pooled connection would see
/// a different database.
pub async fn detached_conn() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database")
}

/// Create an in-memory database with migrations applied.
pub async fn inmem_db() -> DatabaseConnection {
    let db = detached_conn().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn build_services(db: DatabaseConnection) -> ConcreteAppServices {
    AppServices::new(
        Arc::new(db),
        OrmPermissionsRepository::new(),
        OrmMembershipsRepository::new(),
        OrmContactsRepository::new(),
        &ServiceConfig::default(),
    )
}

/// Vec-backed permission store that records index lookups and can fail on a
/// chosen key.
#[derive(Default)]
pub struct InMemoryPermissions {
    records: Mutex<Vec<PermissionRecord>>,
    lookups: Mutex<Vec<String>>,
    failing_key: Option<String>,
}

impl InMemoryPermissions {
    pub fn with_records(records: impl IntoIterator<Item = PermissionRecord>) -> Self {
        Self {
            records: Mutex::new(records.into_iter().collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing_key = Some(key.to_owned());
        self
    }

    pub fn index_lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    fn select(&self, pred: impl Fn(&PermissionRecord) -> bool) -> Vec<PermissionRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PermissionsRepository for InMemoryPermissions {
    async fn put_if_absent<C: ConnectionTrait>(
        &self,
        _conn: &C,
        record: &PermissionRecord,
    ) -> Result<PutOutcome, DomainError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| {
            r.group_name == record.group_name && r.service_action == record.service_action
        }) {
            return Ok(PutOutcome::AlreadyExists);
        }
        records.push(record.clone());
        Ok(PutOutcome::Created)
    }

    async fn delete<C: ConnectionTrait>(
        &self,
        _conn: &C,
        group_name: &str,
        service_action: &str,
    ) -> Result<Option<PermissionRecord>, DomainError> {
        let mut records = self.records.lock().unwrap();
        let pos = records
            .iter()
            .position(|r| r.group_name == group_name && r.service_action == service_action);
        Ok(pos.map(|i| records.remove(i)))
    }

    async fn query_by_partition<C: ConnectionTrait>(
        &self,
        _conn: &C,
        group_name: &str,
    ) -> Result<Vec<PermissionRecord>, DomainError> {
        Ok(self.select(|r| r.group_name == group_name))
    }

    async fn query_by_index<C: ConnectionTrait>(
        &self,
        _conn: &C,
        index: PermissionIndex,
        value: &str,
    ) -> Result<Vec<PermissionRecord>, DomainError> {
        self.lookups.lock().unwrap().push(value.to_owned());
        if self.failing_key.as_deref() == Some(value) {
            return Err(DomainError::store("injected lookup failure"));
        }
        Ok(match index {
            PermissionIndex::ServiceAction => self.select(|r| r.service_action == value),
            PermissionIndex::Service => self.select(|r| r.service == value),
        })
    }

    async fn scan<C: ConnectionTrait>(
        &self,
        _conn: &C,
    ) -> Result<Vec<PermissionRecord>, DomainError> {
        Ok(self.select(|_| true))
    }
}
