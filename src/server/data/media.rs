//! Media album repository.
//!
//! Albums group the files uploaded for a user or a property. A file row stores its
//! path in the `image` or `document` column depending on its media type.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        media::{MediaAlbum, MediaFile, MediaType, StoredFile},
        Choice,
    },
};

pub struct MediaRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MediaRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an album holding the given stored files.
    ///
    /// # Arguments
    /// - `files` - Files already written to storage
    ///
    /// # Returns
    /// - `Ok(MediaAlbum)` - The album with its file rows
    /// - `Err(AppError)` - An insert failed
    pub async fn create_album(&self, files: Vec<StoredFile>) -> Result<MediaAlbum, AppError> {
        let album = entity::media_album::ActiveModel {
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let files = self.add_files(album.id, files).await?;

        Ok(MediaAlbum {
            id: album.id,
            files,
        })
    }

    /// Appends stored files to an existing album.
    pub async fn add_files(
        &self,
        album_id: i32,
        files: Vec<StoredFile>,
    ) -> Result<Vec<MediaFile>, AppError> {
        let mut created = Vec::with_capacity(files.len());

        for file in files {
            let (image, document) = match file.media_type {
                MediaType::Image => (Some(file.path), None),
                MediaType::Document => (None, Some(file.path)),
            };

            let entity = entity::media_file::ActiveModel {
                album_id: ActiveValue::Set(album_id),
                name: ActiveValue::Set(Some(file.name)),
                image: ActiveValue::Set(image),
                document: ActiveValue::Set(document),
                media_type: ActiveValue::Set(file.media_type.as_str().to_string()),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            created.push(MediaFile::from_entity(entity)?);
        }

        Ok(created)
    }

    /// Loads an album with its files in upload order.
    ///
    /// # Returns
    /// - `Ok(Some(MediaAlbum))` - Album found
    /// - `Ok(None)` - No album with that id
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn get_album(&self, album_id: i32) -> Result<Option<MediaAlbum>, AppError> {
        let Some(album) = entity::prelude::MediaAlbum::find_by_id(album_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let files = entity::prelude::MediaFile::find()
            .filter(entity::media_file::Column::AlbumId.eq(album.id))
            .order_by_asc(entity::media_file::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(MediaFile::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(MediaAlbum {
            id: album.id,
            files,
        }))
    }

    /// Loads an optional album reference.
    pub async fn get_optional_album(
        &self,
        album_id: Option<i32>,
    ) -> Result<Option<MediaAlbum>, AppError> {
        match album_id {
            Some(album_id) => self.get_album(album_id).await,
            None => Ok(None),
        }
    }

    pub async fn find_file(&self, file_id: i32) -> Result<Option<MediaFile>, AppError> {
        entity::prelude::MediaFile::find_by_id(file_id)
            .one(self.db)
            .await?
            .map(MediaFile::from_entity)
            .transpose()
    }

    pub async fn delete_file(&self, file_id: i32) -> Result<(), DbErr> {
        entity::prelude::MediaFile::delete_by_id(file_id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
