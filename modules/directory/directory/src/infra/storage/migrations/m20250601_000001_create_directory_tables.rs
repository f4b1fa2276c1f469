//! Permission, membership and contact tables.
//!
//! Each table carries an autoincrement `id` that fixes discovery order and a
//! unique index over the logical key, which makes `ON CONFLICT DO NOTHING`
//! the atomic create-if-absent primitive.

use sea_orm_migration::prelude as mig;

pub struct CreateDirectoryTables;

const GROUP_PERMISSIONS: &str = "group_permissions";
const USER_GROUPS: &str = "user_groups";
const CONTACT_INFO: &str = "contact_info";

impl mig::MigrationName for CreateDirectoryTables {
    fn name(&self) -> &'static str {
        "m20250601_000001_create_directory_tables"
    }
}

fn id_col() -> mig::ColumnDef {
    mig::ColumnDef::new(mig::Alias::new("id"))
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn text_col(name: &str) -> mig::ColumnDef {
    mig::ColumnDef::new(mig::Alias::new(name))
        .string()
        .not_null()
        .to_owned()
}

fn index(name: &str, table: &str, cols: &[&str], unique: bool) -> mig::IndexCreateStatement {
    let mut stmt = mig::Index::create();
    stmt.name(name).table(mig::Alias::new(table)).if_not_exists();
    for col in cols {
        stmt.col(mig::Alias::new(*col));
    }
    if unique {
        stmt.unique();
    }
    stmt
}

#[async_trait::async_trait]
impl mig::MigrationTrait for CreateDirectoryTables {
    async fn up(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .create_table(
                mig::Table::create()
                    .table(mig::Alias::new(GROUP_PERMISSIONS))
                    .if_not_exists()
                    .col(id_col())
                    .col(text_col("group_name"))
                    .col(text_col("service"))
                    .col(text_col("action"))
                    .col(text_col("service_action"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(index(
                "ux_group_permissions_group_service_action",
                GROUP_PERMISSIONS,
                &["group_name", "service_action"],
                true,
            ))
            .await?;
        manager
            .create_index(index(
                "ix_group_permissions_service_action",
                GROUP_PERMISSIONS,
                &["service_action"],
                false,
            ))
            .await?;
        manager
            .create_index(index(
                "ix_group_permissions_service",
                GROUP_PERMISSIONS,
                &["service"],
                false,
            ))
            .await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(mig::Alias::new(USER_GROUPS))
                    .if_not_exists()
                    .col(id_col())
                    .col(text_col("user_id"))
                    .col(text_col("group_name"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(index(
                "ux_user_groups_user_group",
                USER_GROUPS,
                &["user_id", "group_name"],
                true,
            ))
            .await?;
        manager
            .create_index(index(
                "ix_user_groups_group_name",
                USER_GROUPS,
                &["group_name"],
                false,
            ))
            .await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(mig::Alias::new(CONTACT_INFO))
                    .if_not_exists()
                    .col(id_col())
                    .col(text_col("target"))
                    .col(text_col("type"))
                    .col(text_col("data"))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(index(
                "ux_contact_info_target_type",
                CONTACT_INFO,
                &["target", "type"],
                true,
            ))
            .await
    }

    async fn down(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        for table in [CONTACT_INFO, USER_GROUPS, GROUP_PERMISSIONS] {
            manager
                .drop_table(
                    mig::Table::drop()
                        .table(mig::Alias::new(table))
                        .if_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
