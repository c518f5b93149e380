use super::*;

fn stored(name: &str, media_type: MediaType) -> StoredFile {
    StoredFile {
        name: name.to_string(),
        path: format!("properties/images/2026-01-01/{}", name),
        media_type,
    }
}

/// Tests creating an album with files.
///
/// Verifies each file lands in the right path column and is returned in upload
/// order when the album is reloaded.
///
/// Expected: Ok with both files in order
#[tokio::test]
async fn creates_album_with_files() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MediaRepository::new(db);
    let album = repo
        .create_album(vec![
            stored("front.png", MediaType::Image),
            stored("deed.pdf", MediaType::Document),
        ])
        .await?;

    assert_eq!(album.files.len(), 2);

    let reloaded = repo.get_album(album.id).await?.unwrap();
    let names: Vec<&str> = reloaded.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["front.png", "deed.pdf"]);
    assert_eq!(reloaded.files[0].media_type, MediaType::Image);
    assert_eq!(reloaded.files[1].media_type, MediaType::Document);
    assert!(reloaded.files[1].path.ends_with("deed.pdf"));

    Ok(())
}

/// Tests looking up a missing album.
///
/// Expected: Ok(None) for an unknown id and for no id
#[tokio::test]
async fn missing_album_is_none() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MediaRepository::new(db);

    assert!(repo.get_album(77).await?.is_none());
    assert!(repo.get_optional_album(None).await?.is_none());

    Ok(())
}

/// Tests removing a single file from an album.
///
/// Expected: Ok with the file gone and its sibling kept
#[tokio::test]
async fn deletes_single_file() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let album = factory::create_album(db).await?;
    let kept = factory::create_media_file(db, album.id, "IMAGE", "a/kept.png").await?;
    let removed = factory::create_media_file(db, album.id, "IMAGE", "a/removed.png").await?;

    let repo = MediaRepository::new(db);
    repo.delete_file(removed.id).await?;

    assert!(repo.find_file(removed.id).await?.is_none());
    let album = repo.get_album(album.id).await?.unwrap();
    assert_eq!(album.files.len(), 1);
    assert_eq!(album.files[0].id, kept.id);

    Ok(())
}
