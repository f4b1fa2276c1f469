use std::sync::Arc;

use async_trait::async_trait;
use directory_sdk::{
    ContactQuery, ContactRecord, DirectoryClientV1, DirectoryError, MembershipQuery,
    MembershipRecord, NewContact, NewMembership, NewPermission, PermissionQuery, PermissionRecord,
};

use crate::domain::repos::{ContactsRepository, MembershipsRepository, PermissionsRepository};
use crate::domain::service::AppServices;

/// Local implementation of the `DirectoryClientV1` trait that delegates to
/// the domain services.
pub struct LocalClient<PR, MR, CR>
where
    PR: PermissionsRepository,
    MR: MembershipsRepository,
    CR: ContactsRepository,
{
    services: Arc<AppServices<PR, MR, CR>>,
}

impl<PR, MR, CR> LocalClient<PR, MR, CR>
where
    PR: PermissionsRepository,
    MR: MembershipsRepository,
    CR: ContactsRepository,
{
    pub fn new(services: Arc<AppServices<PR, MR, CR>>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl<PR, MR, CR> DirectoryClientV1 for LocalClient<PR, MR, CR>
where
    PR: PermissionsRepository + 'static,
    MR: MembershipsRepository + 'static,
    CR: ContactsRepository + 'static,
{
    async fn list_permissions(
        &self,
        query: PermissionQuery,
    ) -> Result<Vec<PermissionRecord>, DirectoryError> {
        self.services
            .permissions
            .list_permissions(&query)
            .await
            .map_err(Into::into)
    }

    async fn grant_permission(
        &self,
        new_permission: NewPermission,
    ) -> Result<PermissionRecord, DirectoryError> {
        self.services
            .permissions
            .grant(new_permission)
            .await
            .map_err(Into::into)
    }

    async fn revoke_permission(
        &self,
        group_name: &str,
        service_action: &str,
    ) -> Result<PermissionRecord, DirectoryError> {
        self.services
            .permissions
            .revoke(group_name, service_action)
            .await
            .map_err(Into::into)
    }

    async fn list_memberships(
        &self,
        query: MembershipQuery,
    ) -> Result<Vec<MembershipRecord>, DirectoryError> {
        self.services
            .memberships
            .list_memberships(&query)
            .await
            .map_err(Into::into)
    }

    async fn assign_user(
        &self,
        new_membership: NewMembership,
    ) -> Result<MembershipRecord, DirectoryError> {
        self.services
            .memberships
            .assign(new_membership)
            .await
            .map_err(Into::into)
    }

    async fn remove_user(&self, user_id: &str, group_name: &str) -> Result<(), DirectoryError> {
        self.services
            .memberships
            .remove(user_id, group_name)
            .await
            .map_err(Into::into)
    }

    async fn get_contacts(
        &self,
        query: ContactQuery,
    ) -> Result<Vec<ContactRecord>, DirectoryError> {
        self.services
            .contacts
            .get_contacts(&query)
            .await
            .map_err(Into::into)
    }

    async fn create_contact(
        &self,
        new_contact: NewContact,
    ) -> Result<ContactRecord, DirectoryError> {
        self.services
            .contacts
            .create_contact(new_contact)
            .await
            .map_err(Into::into)
    }

    async fn delete_contact(
        &self,
        target: &str,
        contact_type: &str,
    ) -> Result<(), DirectoryError> {
        self.services
            .contacts
            .delete_contact(target, contact_type)
            .await
            .map_err(Into::into)
    }
}
