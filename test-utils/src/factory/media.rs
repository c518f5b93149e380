//! Media album and file factories.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an empty media album.
pub async fn create_album(db: &DatabaseConnection) -> Result<entity::media_album::Model, DbErr> {
    entity::media_album::ActiveModel {
        id: ActiveValue::NotSet,
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Creates a media file row inside an album.
///
/// # Arguments
/// - `album_id` - Owning album
/// - `media_type` - `"IMAGE"` or `"DOCUMENT"`; selects which path column is filled
/// - `path` - Storage path relative to the media root
pub async fn create_media_file(
    db: &DatabaseConnection,
    album_id: i32,
    media_type: &str,
    path: &str,
) -> Result<entity::media_file::Model, DbErr> {
    let (image, document) = if media_type == "IMAGE" {
        (Some(path.to_string()), None)
    } else {
        (None, Some(path.to_string()))
    };

    entity::media_file::ActiveModel {
        id: ActiveValue::NotSet,
        album_id: ActiveValue::Set(album_id),
        name: ActiveValue::Set(path.rsplit('/').next().map(str::to_string)),
        image: ActiveValue::Set(image),
        document: ActiveValue::Set(document),
        media_type: ActiveValue::Set(media_type.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
