//! Local filesystem storage for uploaded media.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::server::{
    error::AppError,
    model::media::{MediaType, StoredFile},
    util::{multipart::UploadedFile, random},
};

/// Top-level directory of the module owning an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Properties,
    Users,
    Companies,
}

impl MediaFolder {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Users => "users",
            Self::Companies => "companies",
        }
    }
}

/// Writes uploads below `root` and hands back paths relative to it.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores an upload under `{folder}/images/{date}/` or `{folder}/documents/{date}/`.
    ///
    /// # Returns
    /// - `Ok(StoredFile)` - The relative path and original name of the stored file
    /// - `Err(AppError::IoErr)` - Writing the file failed
    pub async fn store(
        &self,
        folder: MediaFolder,
        media_type: MediaType,
        file: &UploadedFile,
    ) -> Result<StoredFile, AppError> {
        let kind = match media_type {
            MediaType::Image => "images",
            MediaType::Document => "documents",
        };
        let path = self
            .write(&format!("{}/{}", folder.as_str(), kind), file)
            .await?;

        Ok(StoredFile {
            name: file.file_name.clone(),
            path,
            media_type,
        })
    }

    /// Stores the cover image of a property under `properties/default_images/{date}/`.
    pub async fn store_default_image(&self, file: &UploadedFile) -> Result<String, AppError> {
        self.write("properties/default_images", file).await
    }

    /// Removes a stored file. A file that no longer exists is not an error.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal of files written for a request that failed afterwards.
    pub async fn discard(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.delete(path).await {
                tracing::warn!("Failed to remove orphaned upload {}: {}", path, e);
            }
        }
    }

    async fn write(&self, prefix: &str, file: &UploadedFile) -> Result<String, AppError> {
        let relative = format!(
            "{}/{}/{}_{}",
            prefix,
            Utc::now().format("%Y-%m-%d"),
            random::alphanumeric(8),
            sanitize_file_name(&file.file_name)
        );
        let absolute = self.root.join(&relative);

        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&absolute, &file.bytes).await?;
        tracing::debug!("Stored upload at {}", relative);

        Ok(relative)
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}
