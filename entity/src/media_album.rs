use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media_albums")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::media_file::Entity")]
    MediaFile,
}

impl Related<super::media_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MediaFile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
