//! Wildcard-aware permission resolution.
//!
//! Grants are stored literally: `("ops", "deploy", "all")` lives under the
//! composite key `deploy#all`. A requested `(service, action)` pair can only be
//! matched by four keys, so resolution is a fixed set of indexed lookups
//! merged in precedence order:
//!
//! 1. exact `{service}#{action}`
//! 2. service wildcard `{service}#all`
//! 3. action wildcard `all#{action}`
//! 4. full wildcard `all#all`
//!
//! The merge keeps the first record seen for each group, so a group matched by
//! several buckets is reported once, under its highest-precedence bucket.
//! Within a bucket the store's insertion order decides.
//!
//! Sub-queries are not read in one snapshot. A failing sub-query fails the
//! whole resolution; partial results are never returned.

use std::collections::HashSet;

use directory_sdk::{PermissionQuery, PermissionRecord, WILDCARD, service_action_key};
use sea_orm::ConnectionTrait;
use tracing::{debug, instrument};

use super::error::DomainError;
use super::repos::{PermissionIndex, PermissionsRepository};

/// Precedence tier of a `(service, action)` match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Exact,
    ServiceWildcard,
    ActionWildcard,
    FullWildcard,
}

impl Bucket {
    /// All buckets, highest precedence first.
    pub const PRECEDENCE: [Self; 4] = [
        Self::Exact,
        Self::ServiceWildcard,
        Self::ActionWildcard,
        Self::FullWildcard,
    ];

    /// Composite key this bucket looks up for the requested pair.
    #[must_use]
    pub fn key(self, service: &str, action: &str) -> String {
        match self {
            Self::Exact => service_action_key(service, action),
            Self::ServiceWildcard => service_action_key(service, WILDCARD),
            Self::ActionWildcard => service_action_key(WILDCARD, action),
            Self::FullWildcard => service_action_key(WILDCARD, WILDCARD),
        }
    }
}

/// Ordered accumulation keyed by `group_name`; a group is inserted only if
/// absent.
#[derive(Debug, Default)]
pub struct GroupAccumulator {
    seen: HashSet<String>,
    records: Vec<PermissionRecord>,
}

impl GroupAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = PermissionRecord>) {
        for record in records {
            if !self.seen.contains(&record.group_name) {
                self.seen.insert(record.group_name.clone());
                self.records.push(record);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<PermissionRecord> {
        self.records
    }
}

/// Answer any permission query against the store.
///
/// # Errors
/// Returns `DomainError::Store` if any store lookup fails.
pub async fn resolve<R, C>(
    repo: &R,
    conn: &C,
    query: &PermissionQuery,
) -> Result<Vec<PermissionRecord>, DomainError>
where
    R: PermissionsRepository,
    C: ConnectionTrait,
{
    match query {
        PermissionQuery::All => repo.scan(conn).await,
        PermissionQuery::ByGroup { group_name } => resolve_by_group(repo, conn, group_name).await,
        PermissionQuery::ByServiceAndAction { service, action } => {
            resolve_by_service_and_action(repo, conn, service, action).await
        }
        PermissionQuery::ByServiceAction { service_action } => {
            repo.query_by_index(conn, PermissionIndex::ServiceAction, service_action)
                .await
        }
        PermissionQuery::ByService { service } => resolve_by_service(repo, conn, service).await,
    }
}

/// A group's own records. They are literal, so nothing is expanded or merged.
///
/// # Errors
/// Returns `DomainError::Store` if the lookup fails.
#[instrument(skip(repo, conn))]
pub async fn resolve_by_group<R, C>(
    repo: &R,
    conn: &C,
    group_name: &str,
) -> Result<Vec<PermissionRecord>, DomainError>
where
    R: PermissionsRepository,
    C: ConnectionTrait,
{
    repo.query_by_partition(conn, group_name).await
}

/// One record per group whose grants cover `(service, action)`.
///
/// # Errors
/// Returns `DomainError::Store` if any bucket lookup fails.
#[instrument(skip(repo, conn))]
pub async fn resolve_by_service_and_action<R, C>(
    repo: &R,
    conn: &C,
    service: &str,
    action: &str,
) -> Result<Vec<PermissionRecord>, DomainError>
where
    R: PermissionsRepository,
    C: ConnectionTrait,
{
    let mut acc = GroupAccumulator::new();
    let mut queried: Vec<String> = Vec::with_capacity(Bucket::PRECEDENCE.len());

    for bucket in Bucket::PRECEDENCE {
        let key = bucket.key(service, action);
        // A literal "all" in the request makes some buckets share a key.
        if queried.contains(&key) {
            continue;
        }
        let records = repo
            .query_by_index(conn, PermissionIndex::ServiceAction, &key)
            .await?;
        debug!(?bucket, key = %key, matched = records.len(), "Bucket lookup");
        acc.extend(records);
        queried.push(key);
    }

    debug!(groups = acc.len(), "Resolved service/action query");
    Ok(acc.into_records())
}

/// One record per group holding any grant on `service`, followed by groups
/// holding a blanket grant on every service.
///
/// # Errors
/// Returns `DomainError::Store` if either lookup fails.
#[instrument(skip(repo, conn))]
pub async fn resolve_by_service<R, C>(
    repo: &R,
    conn: &C,
    service: &str,
) -> Result<Vec<PermissionRecord>, DomainError>
where
    R: PermissionsRepository,
    C: ConnectionTrait,
{
    let mut acc = GroupAccumulator::new();
    acc.extend(
        repo.query_by_index(conn, PermissionIndex::Service, service)
            .await?,
    );
    if service != WILDCARD {
        acc.extend(
            repo.query_by_index(conn, PermissionIndex::Service, WILDCARD)
                .await?,
        );
    }

    debug!(groups = acc.len(), "Resolved service query");
    Ok(acc.into_records())
}
