use async_trait::async_trait;
use directory_sdk::PermissionRecord;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::domain::error::DomainError;
use crate::domain::repos::{PermissionIndex, PermissionsRepository, PutOutcome};
use crate::infra::storage::entity::permission::{
    ActiveModel as PermissionAM, Column as PermissionColumn, Entity as PermissionEntity,
};

/// ORM-based implementation of the `PermissionsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmPermissionsRepository;

impl OrmPermissionsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn index_column(index: PermissionIndex) -> PermissionColumn {
    match index {
        PermissionIndex::ServiceAction => PermissionColumn::ServiceAction,
        PermissionIndex::Service => PermissionColumn::Service,
    }
}

#[async_trait]
impl PermissionsRepository for OrmPermissionsRepository {
    async fn put_if_absent<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &PermissionRecord,
    ) -> Result<PutOutcome, DomainError> {
        let m = PermissionAM {
            id: NotSet,
            group_name: Set(record.group_name.clone()),
            service: Set(record.service.clone()),
            action: Set(record.action.clone()),
            service_action: Set(record.service_action.clone()),
        };

        let inserted = PermissionEntity::insert(m)
            .on_conflict(
                OnConflict::columns([PermissionColumn::GroupName, PermissionColumn::ServiceAction])
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
        group_name: &str,
        service_action: &str,
    ) -> Result<Option<PermissionRecord>, DomainError> {
        let key = sea_orm::Condition::all()
            .add(PermissionColumn::GroupName.eq(group_name))
            .add(PermissionColumn::ServiceAction.eq(service_action));

        let Some(existing) = PermissionEntity::find()
            .filter(key.clone())
            .one(conn)
            .await?
        else {
            return Ok(None);
        };

        let result = PermissionEntity::delete_many().filter(key).exec(conn).await?;

        // A concurrent revoke may have won between the read and the delete.
        Ok((result.rows_affected > 0).then(|| existing.into()))
    }

    async fn query_by_partition<C: ConnectionTrait>(
        &self,
        conn: &C,
        group_name: &str,
    ) -> Result<Vec<PermissionRecord>, DomainError> {
        let rows = PermissionEntity::find()
            .filter(PermissionColumn::GroupName.eq(group_name))
            .order_by_asc(PermissionColumn::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn query_by_index<C: ConnectionTrait>(
        &self,
        conn: &C,
        index: PermissionIndex,
        value: &str,
    ) -> Result<Vec<PermissionRecord>, DomainError> {
        let rows = PermissionEntity::find()
            .filter(index_column(index).eq(value))
            .order_by_asc(PermissionColumn::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn scan<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Vec<PermissionRecord>, DomainError> {
        let rows = PermissionEntity::find()
            .order_by_asc(PermissionColumn::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
