//! Domain service layer - business logic and rules.
//!
//! ## Architecture
//!
//! Per-resource submodules:
//! - `permissions` - grant/revoke and wildcard-aware reads (delegates to `resolution`)
//! - `memberships` - user-to-group assignment
//! - `contacts` - contact information CRUD
//!
//! ## Layering Rules
//!
//! The domain layer:
//! - **MAY** import: `directory_sdk` (contract types), `sea_orm` connection traits
//! - **MUST NOT** import: `api::*` (one-way dependency: API → Domain)
//!
//! ## Connection Management
//!
//! Services hold the shared connection pool and hand it to repositories per
//! call. Handlers never touch database objects.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::error::DomainError;
use crate::domain::repos::{ContactsRepository, MembershipsRepository, PermissionsRepository};

mod contacts;
mod memberships;
mod permissions;

pub use contacts::ContactsService;
pub use memberships::MembershipsService;
pub use permissions::PermissionsService;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_field_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_field_length: 256,
        }
    }
}

impl ServiceConfig {
    /// Reject empty or oversized values.
    pub(crate) fn validate_field(&self, field: &str, value: &str) -> Result<(), DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::malformed_input(format!(
                "{field} must not be empty"
            )));
        }
        if value.len() > self.max_field_length {
            return Err(DomainError::malformed_input(format!(
                "{field} exceeds maximum length of {}",
                self.max_field_length
            )));
        }
        Ok(())
    }
}

// DI Container - aggregates all domain services
pub struct AppServices<PR, MR, CR>
where
    PR: PermissionsRepository,
    MR: MembershipsRepository,
    CR: ContactsRepository,
{
    pub permissions: Arc<PermissionsService<PR>>,
    pub memberships: Arc<MembershipsService<MR>>,
    pub contacts: Arc<ContactsService<CR>>,
}

impl<PR, MR, CR> AppServices<PR, MR, CR>
where
    PR: PermissionsRepository,
    MR: MembershipsRepository,
    CR: ContactsRepository,
{
    pub fn new(
        db: Arc<DatabaseConnection>,
        permissions_repo: PR,
        memberships_repo: MR,
        contacts_repo: CR,
        config: &ServiceConfig,
    ) -> Self {
        Self {
            permissions: Arc::new(PermissionsService::new(
                Arc::clone(&db),
                Arc::new(permissions_repo),
                config.clone(),
            )),
            memberships: Arc::new(MembershipsService::new(
                Arc::clone(&db),
                Arc::new(memberships_repo),
                config.clone(),
            )),
            contacts: Arc::new(ContactsService::new(
                db,
                Arc::new(contacts_repo),
                config.clone(),
            )),
        }
    }
}

#[cfg(test)]
mod tests_permissions;

#[cfg(test)]
mod tests_memberships;

#[cfg(test)]
mod tests_contacts;
