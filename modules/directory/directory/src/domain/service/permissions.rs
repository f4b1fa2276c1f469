use std::sync::Arc;

use directory_sdk::{KEY_SEPARATOR, NewPermission, PermissionQuery, PermissionRecord};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::repos::{PermissionsRepository, PutOutcome};
use crate::domain::resolution;

use super::ServiceConfig;

pub(crate) const PERMISSION_EXISTS: &str = "Permission already exists";
pub(crate) const PERMISSION_NOT_FOUND: &str = "Permission not found";

/// Permissions service.
///
/// Grants are immutable: a permission is created once and later revoked,
/// never updated.
pub struct PermissionsService<R: PermissionsRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
    config: ServiceConfig,
}

impl<R: PermissionsRepository> PermissionsService<R> {
    pub fn new(db: Arc<DatabaseConnection>, repo: Arc<R>, config: ServiceConfig) -> Self {
        Self { db, repo, config }
    }

    /// # Errors
    /// Returns `DomainError::Store` if any store lookup fails.
    #[instrument(skip(self))]
    pub async fn list_permissions(
        &self,
        query: &PermissionQuery,
    ) -> Result<Vec<PermissionRecord>, DomainError> {
        debug!("Resolving permissions");

        let records = resolution::resolve(&*self.repo, &*self.db, query).await?;

        debug!("Resolved {} permission records", records.len());
        Ok(records)
    }

    /// # Errors
    /// `MalformedInput` for invalid fields, `Conflict` if already granted.
    #[instrument(
        skip(self, new_permission),
        fields(
            group_name = %new_permission.group_name,
            service = %new_permission.service,
            action = %new_permission.action
        )
    )]
    pub async fn grant(
        &self,
        new_permission: NewPermission,
    ) -> Result<PermissionRecord, DomainError> {
        info!("Granting permission");

        self.config
            .validate_field("group_name", &new_permission.group_name)?;
        self.validate_key_part("service", &new_permission.service)?;
        self.validate_key_part("action", &new_permission.action)?;

        let record = PermissionRecord::from(new_permission);

        match self.repo.put_if_absent(&*self.db, &record).await? {
            PutOutcome::Created => {
                info!(service_action = %record.service_action, "Permission granted");
                Ok(record)
            }
            PutOutcome::AlreadyExists => {
                warn!(service_action = %record.service_action, "Permission already granted");
                Err(DomainError::conflict(PERMISSION_EXISTS))
            }
        }
    }

    /// # Errors
    /// `NotFound` if the group does not hold the permission.
    #[instrument(skip(self))]
    pub async fn revoke(
        &self,
        group_name: &str,
        service_action: &str,
    ) -> Result<PermissionRecord, DomainError> {
        info!("Revoking permission");

        let removed = self
            .repo
            .delete(&*self.db, group_name, service_action)
            .await?
            .ok_or_else(|| DomainError::not_found(PERMISSION_NOT_FOUND))?;

        info!("Successfully revoked permission");
        Ok(removed)
    }

    /// `service` and `action` become halves of the composite key.
    fn validate_key_part(&self, field: &str, value: &str) -> Result<(), DomainError> {
        self.config.validate_field(field, value)?;
        if value.contains(KEY_SEPARATOR) {
            return Err(DomainError::malformed_input(format!(
                "{field} must not contain '{KEY_SEPARATOR}'"
            )));
        }
        Ok(())
    }
}
