//! Media file entity - a stored image or document belonging to an album.
//!
//! Exactly one of `image` and `document` is set, matching `media_type`. Both hold the
//! storage path relative to the media root.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub album_id: i32,
    pub name: Option<String>,
    pub image: Option<String>,
    pub document: Option<String>,
    /// `IMAGE` or `DOCUMENT`
    pub media_type: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::media_album::Entity",
        from = "Column::AlbumId",
        to = "super::media_album::Column::Id",
        on_delete = "Cascade"
    )]
    MediaAlbum,
}

impl Related<super::media_album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MediaAlbum.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
