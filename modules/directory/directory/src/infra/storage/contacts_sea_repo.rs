use async_trait::async_trait;
use directory_sdk::ContactRecord;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::domain::error::DomainError;
use crate::domain::repos::{ContactsRepository, PutOutcome};
use crate::infra::storage::entity::contact::{
    ActiveModel as ContactAM, Column as ContactColumn, Entity as ContactEntity,
};

/// ORM-based implementation of the `ContactsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmContactsRepository;

impl OrmContactsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn key(target: &str, contact_type: &str) -> sea_orm::Condition {
    sea_orm::Condition::all()
        .add(ContactColumn::Target.eq(target))
        .add(ContactColumn::ContactType.eq(contact_type))
}

#[async_trait]
impl ContactsRepository for OrmContactsRepository {
    async fn put_if_absent<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &ContactRecord,
    ) -> Result<PutOutcome, DomainError> {
        let m = ContactAM {
            id: NotSet,
            target: Set(record.target.clone()),
            contact_type: Set(record.contact_type.clone()),
            data: Set(record.data.clone()),
        };

        let inserted = ContactEntity::insert(m)
            .on_conflict(
                OnConflict::columns([ContactColumn::Target, ContactColumn::ContactType])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        Ok(if inserted == 0 {
            PutOutcome::AlreadyExists
        } else {
            PutOutcome::Created
        })
    }

    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        target: &str,
        contact_type: &str,
    ) -> Result<Option<ContactRecord>, DomainError> {
        let found = ContactEntity::find()
            .filter(key(target, contact_type))
            .one(conn)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        target: &str,
        contact_type: &str,
    ) -> Result<bool, DomainError> {
        let result = ContactEntity::delete_many()
            .filter(key(target, contact_type))
            .exec(conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn query_by_partition<C: ConnectionTrait>(
        &self,
        conn: &C,
        target: &str,
    ) -> Result<Vec<ContactRecord>, DomainError> {
        let rows = ContactEntity::find()
            .filter(ContactColumn::Target.eq(target))
            .order_by_asc(ContactColumn::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn scan<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<ContactRecord>, DomainError> {
        let rows = ContactEntity::find()
            .order_by_asc(ContactColumn::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
