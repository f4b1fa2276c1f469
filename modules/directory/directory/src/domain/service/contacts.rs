use std::sync::Arc;

use directory_sdk::{ContactQuery, ContactRecord, NewContact};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::repos::{ContactsRepository, PutOutcome};

use super::ServiceConfig;

pub(crate) const CONTACT_EXISTS: &str =
    "Contact information already exists for this target and type";
pub(crate) const CONTACT_NOT_FOUND: &str = "Contact information not found";

/// Contacts service. Plain keyed storage; `data` is never inspected.
pub struct ContactsService<R: ContactsRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
    config: ServiceConfig,
}

impl<R: ContactsRepository> ContactsService<R> {
    pub fn new(db: Arc<DatabaseConnection>, repo: Arc<R>, config: ServiceConfig) -> Self {
        Self { db, repo, config }
    }

    /// Target-scoped lookups always yield at least one record.
    ///
    /// # Errors
    /// `NotFound` if a target-scoped lookup matches nothing.
    #[instrument(skip(self))]
    pub async fn get_contacts(
        &self,
        query: &ContactQuery,
    ) -> Result<Vec<ContactRecord>, DomainError> {
        debug!("Getting contact information");

        match query {
            ContactQuery::All => self.repo.scan(&*self.db).await,
            ContactQuery::ByKey {
                target,
                contact_type,
            } => {
                let contact = self
                    .repo
                    .get(&*self.db, target, contact_type)
                    .await?
                    .ok_or_else(|| DomainError::not_found(CONTACT_NOT_FOUND))?;
                Ok(vec![contact])
            }
            ContactQuery::ByTarget { target } => {
                let contacts = self.repo.query_by_partition(&*self.db, target).await?;
                if contacts.is_empty() {
                    return Err(DomainError::not_found(CONTACT_NOT_FOUND));
                }
                Ok(contacts)
            }
        }
    }

    /// # Errors
    /// `MalformedInput` for empty keys, `Conflict` if the key is taken.
    #[instrument(
        skip(self, new_contact),
        fields(target = %new_contact.target, contact_type = %new_contact.contact_type)
    )]
    pub async fn create_contact(
        &self,
        new_contact: NewContact,
    ) -> Result<ContactRecord, DomainError> {
        info!("Creating contact information");

        self.config.validate_field("target", &new_contact.target)?;
        self.config
            .validate_field("type", &new_contact.contact_type)?;

        let record = ContactRecord::from(new_contact);
        match self.repo.put_if_absent(&*self.db, &record).await? {
            PutOutcome::Created => {
                info!("Successfully created contact information");
                Ok(record)
            }
            PutOutcome::AlreadyExists => {
                warn!("Contact information already present");
                Err(DomainError::conflict(CONTACT_EXISTS))
            }
        }
    }

    /// Idempotent: deleting an absent contact succeeds.
    ///
    /// # Errors
    /// Returns `DomainError::Store` if the delete fails.
    #[instrument(skip(self))]
    pub async fn delete_contact(&self, target: &str, contact_type: &str) -> Result<(), DomainError> {
        info!("Deleting contact information");

        let removed = self.repo.delete(&*self.db, target, contact_type).await?;

        debug!(removed, "Contact delete finished");
        Ok(())
    }
}
