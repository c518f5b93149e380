use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MediaFileDto {
    pub id: i32,
    pub name: String,
    /// `IMAGE` or `DOCUMENT`
    pub media_type: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MediaAlbumDto {
    pub id: i32,
    pub files: Vec<MediaFileDto>,
}
