//! Public API trait for the directory module.

use async_trait::async_trait;

use crate::error::DirectoryError;
use crate::models::{
    ContactQuery, ContactRecord, MembershipQuery, MembershipRecord, NewContact, NewMembership,
    NewPermission, PermissionQuery, PermissionRecord,
};

/// Public API trait for the directory.
///
/// Implemented in-process by the module's local client; consumers hold it as
/// `Arc<dyn DirectoryClientV1>`.
#[async_trait]
pub trait DirectoryClientV1: Send + Sync {
    /// Read permissions. `(service, action)` and `service` queries are
    /// wildcard-aware and return one record per group.
    ///
    /// # Errors
    ///
    /// - `Internal` if any underlying store lookup fails
    async fn list_permissions(
        &self,
        query: PermissionQuery,
    ) -> Result<Vec<PermissionRecord>, DirectoryError>;

    /// Grant a permission to a group.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` for empty fields or fields containing `#`
    /// - `Conflict` if the group already holds the permission
    async fn grant_permission(
        &self,
        new_permission: NewPermission,
    ) -> Result<PermissionRecord, DirectoryError>;

    /// Revoke a permission and return the removed record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the group does not hold the permission
    async fn revoke_permission(
        &self,
        group_name: &str,
        service_action: &str,
    ) -> Result<PermissionRecord, DirectoryError>;

    /// Read group memberships.
    ///
    /// # Errors
    ///
    /// - `Internal` if the store lookup fails
    async fn list_memberships(
        &self,
        query: MembershipQuery,
    ) -> Result<Vec<MembershipRecord>, DirectoryError>;

    /// Add a user to a group.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the user is already a member
    async fn assign_user(
        &self,
        new_membership: NewMembership,
    ) -> Result<MembershipRecord, DirectoryError>;

    /// Remove a user from a group. Succeeds when the membership is absent.
    ///
    /// # Errors
    ///
    /// - `Internal` if the store delete fails
    async fn remove_user(&self, user_id: &str, group_name: &str) -> Result<(), DirectoryError>;

    /// Read contact information.
    ///
    /// # Errors
    ///
    /// - `NotFound` if a target-scoped lookup matches nothing
    async fn get_contacts(&self, query: ContactQuery)
    -> Result<Vec<ContactRecord>, DirectoryError>;

    /// Store contact information for a target and channel.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the target already has data for that channel
    async fn create_contact(&self, new_contact: NewContact)
    -> Result<ContactRecord, DirectoryError>;

    /// Delete contact information. Succeeds when the record is absent.
    ///
    /// # Errors
    ///
    /// - `Internal` if the store delete fails
    async fn delete_contact(&self, target: &str, contact_type: &str)
    -> Result<(), DirectoryError>;
}
