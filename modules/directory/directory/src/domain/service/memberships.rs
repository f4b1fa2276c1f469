use std::sync::Arc;

use directory_sdk::{MembershipQuery, MembershipRecord, NewMembership};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::repos::{MembershipIndex, MembershipsRepository, PutOutcome};

use super::ServiceConfig;

pub(crate) const MEMBERSHIP_EXISTS: &str = "User is already assigned to this group";

pub struct MembershipsService<R: MembershipsRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
    config: ServiceConfig,
}

impl<R: MembershipsRepository> MembershipsService<R> {
    pub fn new(db: Arc<DatabaseConnection>, repo: Arc<R>, config: ServiceConfig) -> Self {
        Self { db, repo, config }
    }

    /// # Errors
    /// Returns `DomainError::Store` if the lookup fails.
    pub async fn list_memberships(
        &self,
        query: &MembershipQuery,
    ) -> Result<Vec<MembershipRecord>, DomainError> {
        match query {
            MembershipQuery::All => {
                debug!("Listing all memberships");
                self.repo.scan(&*self.db).await
            }
            MembershipQuery::ByUser { user_id } => self.get_user_groups(user_id).await,
            MembershipQuery::ByGroup { group_name } => self.get_group_users(group_name).await,
        }
    }

    /// # Errors
    /// Returns `DomainError::Store` if the lookup fails.
    #[instrument(skip(self))]
    pub async fn get_user_groups(
        &self,
        user_id: &str,
    ) -> Result<Vec<MembershipRecord>, DomainError> {
        debug!("Getting groups for user");
        self.repo.query_by_partition(&*self.db, user_id).await
    }

    /// # Errors
    /// Returns `DomainError::Store` if the lookup fails.
    #[instrument(skip(self))]
    pub async fn get_group_users(
        &self,
        group_name: &str,
    ) -> Result<Vec<MembershipRecord>, DomainError> {
        debug!("Getting users for group");
        self.repo
            .query_by_index(&*self.db, MembershipIndex::GroupName, group_name)
            .await
    }

    /// # Errors
    /// `MalformedInput` for empty fields, `Conflict` if already a member.
    #[instrument(
        skip(self, new_membership),
        fields(user_id = %new_membership.user_id, group_name = %new_membership.group_name)
    )]
    pub async fn assign(
        &self,
        new_membership: NewMembership,
    ) -> Result<MembershipRecord, DomainError> {
        info!("Assigning user to group");

        self.config
            .validate_field("user_id", &new_membership.user_id)?;
        self.config
            .validate_field("group_name", &new_membership.group_name)?;

        let record = MembershipRecord::from(new_membership);
        match self.repo.put_if_absent(&*self.db, &record).await? {
            PutOutcome::Created => {
                info!("Successfully assigned user to group");
                Ok(record)
            }
            PutOutcome::AlreadyExists => {
                warn!("User already in group");
                Err(DomainError::conflict(MEMBERSHIP_EXISTS))
            }
        }
    }

    /// Idempotent: removing an absent membership succeeds.
    ///
    /// # Errors
    /// Returns `DomainError::Store` if the delete fails.
    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: &str, group_name: &str) -> Result<(), DomainError> {
        info!("Removing user from group");

        let removed = self.repo.delete(&*self.db, user_id, group_name).await?;

        debug!(removed, "Membership delete finished");
        Ok(())
    }
}
