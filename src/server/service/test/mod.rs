use std::sync::Arc;

use crate::server::{
    error::AppError,
    model::user::User,
    service::{
        email::{Mailer, RecordingMailSender},
        storage::MediaStorage,
    },
    util::multipart::UploadedFile,
};

mod cart;
mod inspection;
mod notification;
mod review;
mod transaction;

const APP_URL: &str = "http://localhost:8080";

/// Mailer whose messages can be inspected by the test.
fn recording_mailer() -> (Mailer, Arc<RecordingMailSender>) {
    let sender = Arc::new(RecordingMailSender::default());
    (Mailer::new(sender.clone()), sender)
}

/// Media storage rooted in a temporary directory that lives as long as the guard.
fn temp_storage() -> (tempfile::TempDir, MediaStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = MediaStorage::new(dir.path());
    (dir, storage)
}

fn domain_user(model: entity::user::Model) -> Result<User, AppError> {
    User::from_entity(model)
}

fn png(name: &str) -> UploadedFile {
    UploadedFile::new(name, Some("image/png"), vec![0x89, b'P', b'N', b'G'])
}

fn pdf(name: &str) -> UploadedFile {
    UploadedFile::new(name, Some("application/pdf"), b"%PDF-1.4".to_vec())
}

/// Number of files stored below `root`, at any depth.
fn stored_file_count(root: &std::path::Path) -> usize {
    let Ok(entries) = std::fs::read_dir(root) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                stored_file_count(&path)
            } else {
                1
            }
        })
        .sum()
}
