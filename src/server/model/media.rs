//! Media album and file domain models.

use crate::{
    model::media::{MediaAlbumDto, MediaFileDto},
    server::{error::AppError, model::Choice},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Document,
}

impl Choice for MediaType {
    const ALL: &'static [Self] = &[Self::Image, Self::Document];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Document => "DOCUMENT",
        }
    }
}

/// Absolute URL of a stored media path.
pub fn media_url(app_url: &str, path: &str) -> String {
    format!("{}/media/{}", app_url, path)
}

/// A stored file belonging to an album.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub id: i32,
    pub album_id: i32,
    pub name: String,
    /// Storage path relative to the media root.
    pub path: String,
    pub media_type: MediaType,
}

impl MediaFile {
    pub fn from_entity(entity: entity::media_file::Model) -> Result<Self, AppError> {
        let media_type = MediaType::from_column("media_type", &entity.media_type)?;
        let path = match media_type {
            MediaType::Image => entity.image,
            MediaType::Document => entity.document,
        }
        .unwrap_or_default();

        Ok(Self {
            id: entity.id,
            album_id: entity.album_id,
            name: entity.name.unwrap_or_default(),
            path,
            media_type,
        })
    }

    pub fn into_dto(self, app_url: &str) -> MediaFileDto {
        MediaFileDto {
            id: self.id,
            name: self.name,
            media_type: self.media_type.as_str().to_string(),
            url: media_url(app_url, &self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaAlbum {
    pub id: i32,
    pub files: Vec<MediaFile>,
}

impl MediaAlbum {
    pub fn into_dto(self, app_url: &str) -> MediaAlbumDto {
        MediaAlbumDto {
            id: self.id,
            files: self
                .files
                .into_iter()
                .map(|file| file.into_dto(app_url))
                .collect(),
        }
    }
}

/// A file already written to storage, waiting for its database row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub name: String,
    pub path: String,
    pub media_type: MediaType,
}
