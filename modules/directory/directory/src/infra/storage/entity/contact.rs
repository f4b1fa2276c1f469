use directory_sdk::ContactRecord;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub target: String,
    #[sea_orm(column_name = "type")]
    pub contact_type: String,
    pub data: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContactRecord {
    fn from(m: Model) -> Self {
        Self {
            target: m.target,
            contact_type: m.contact_type,
            data: m.data,
        }
    }
}
