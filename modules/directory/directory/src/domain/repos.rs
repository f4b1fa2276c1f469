//! Store collaborator contracts.
//!
//! Repositories do not own a connection; every method takes `&impl
//! ConnectionTrait` so callers decide whether it runs on the pool or inside a
//! transaction.

use async_trait::async_trait;
use directory_sdk::{ContactRecord, MembershipRecord, PermissionRecord};
use sea_orm::ConnectionTrait;

use super::error::DomainError;

/// Result of a create-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Created,
    AlreadyExists,
}

/// Secondary lookup paths of the permission store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionIndex {
    /// Composite `service#action` key.
    ServiceAction,
    /// Bare `service` value.
    Service,
}

/// Secondary lookup paths of the membership store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipIndex {
    GroupName,
}

/// Permission records keyed by `(group_name, service_action)`.
///
/// Every query returns records in insertion order.
#[async_trait]
pub trait PermissionsRepository: Send + Sync {
    /// Atomic conditional insert on `(group_name, service_action)`.
    async fn put_if_absent<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &PermissionRecord,
    ) -> Result<PutOutcome, DomainError>;

    /// Remove a record, returning it if it existed.
    async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        group_name: &str,
        service_action: &str,
    ) -> Result<Option<PermissionRecord>, DomainError>;

    async fn query_by_partition<C: ConnectionTrait>(
        &self,
        conn: &C,
        group_name: &str,
    ) -> Result<Vec<PermissionRecord>, DomainError>;

    async fn query_by_index<C: ConnectionTrait>(
        &self,
        conn: &C,
        index: PermissionIndex,
        value: &str,
    ) -> Result<Vec<PermissionRecord>, DomainError>;

    async fn scan<C: ConnectionTrait>(&self, conn: &C)
    -> Result<Vec<PermissionRecord>, DomainError>;
}

/// Membership pairs keyed by `(user_id, group_name)`.
#[async_trait]
pub trait MembershipsRepository: Send + Sync {
    async fn put_if_absent<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &MembershipRecord,
    ) -> Result<PutOutcome, DomainError>;

    /// Unconditional delete. Returns whether a row was removed.
    async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
        group_name: &str,
    ) -> Result<bool, DomainError>;

    async fn query_by_partition<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Vec<MembershipRecord>, DomainError>;

    async fn query_by_index<C: ConnectionTrait>(
        &self,
        conn: &C,
        index: MembershipIndex,
        value: &str,
    ) -> Result<Vec<MembershipRecord>, DomainError>;

    async fn scan<C: ConnectionTrait>(&self, conn: &C)
    -> Result<Vec<MembershipRecord>, DomainError>;
}

/// Contact data keyed by `(target, type)`.
#[async_trait]
pub trait ContactsRepository: Send + Sync {
    async fn put_if_absent<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &ContactRecord,
    ) -> Result<PutOutcome, DomainError>;

    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        target: &str,
        contact_type: &str,
    ) -> Result<Option<ContactRecord>, DomainError>;

    /// Unconditional delete. Returns whether a row was removed.
    async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        target: &str,
        contact_type: &str,
    ) -> Result<bool, DomainError>;

    async fn query_by_partition<C: ConnectionTrait>(
        &self,
        conn: &C,
        target: &str,
    ) -> Result<Vec<ContactRecord>, DomainError>;

    async fn scan<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<ContactRecord>, DomainError>;
}
