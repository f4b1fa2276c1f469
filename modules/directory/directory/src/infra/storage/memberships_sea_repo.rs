use async_trait::async_trait;
use directory_sdk::MembershipRecord;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::domain::error::DomainError;
use crate::domain::repos::{MembershipIndex, MembershipsRepository, PutOutcome};
use crate::infra::storage::entity::membership::{
    ActiveModel as MembershipAM, Column as MembershipColumn, Entity as MembershipEntity,
};

/// ORM-based implementation of the `MembershipsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmMembershipsRepository;

impl OrmMembershipsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MembershipsRepository for OrmMembershipsRepository {
    async fn put_if_absent<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &MembershipRecord,
    ) -> Result<PutOutcome, DomainError> {
        let m = MembershipAM {
            id: NotSet,
            user_id: Set(record.user_id.clone()),
            group_name: Set(record.group_name.clone()),
        };

        let inserted = MembershipEntity::insert(m)
            .on_conflict(
                OnConflict::columns([MembershipColumn::UserId, MembershipColumn::GroupName])
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

    async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
        group_name: &str,
    ) -> Result<bool, DomainError> {
        let result = MembershipEntity::delete_many()
            .filter(MembershipColumn::UserId.eq(user_id))
            .filter(MembershipColumn::GroupName.eq(group_name))
            .exec(conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn query_by_partition<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: &str,
    ) -> Result<Vec<MembershipRecord>, DomainError> {
        let rows = MembershipEntity::find()
            .filter(MembershipColumn::UserId.eq(user_id))
            .order_by_asc(MembershipColumn::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn query_by_index<C: ConnectionTrait>(
        &self,
        conn: &C,
        index: MembershipIndex,
        value: &str,
    ) -> Result<Vec<MembershipRecord>, DomainError> {
        let column = match index {
            MembershipIndex::GroupName => MembershipColumn::GroupName,
        };
        let rows = MembershipEntity::find()
            .filter(column.eq(value))
            .order_by_asc(MembershipColumn::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn scan<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Vec<MembershipRecord>, DomainError> {
        let rows = MembershipEntity::find()
            .order_by_asc(MembershipColumn::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
