use directory_sdk::PermissionRecord;
use sea_orm::entity::prelude::*;

/// `id` orders rows by insertion; the logical key is `(group_name, service_action)`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "group_permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub group_name: String,
    pub service: String,
    pub action: String,
    pub service_action: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PermissionRecord {
    fn from(m: Model) -> Self {
        Self {
            group_name: m.group_name,
            service_action: m.service_action,
            service: m.service,
            action: m.action,
        }
    }
}
