use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{media::MediaRepository, user::UserRepository},
    error::{validation::ValidationError, AppError},
    model::{
        media::{MediaType, StoredFile},
        user::{IdentityDocumentType, Profile, UpdateProfileParam, User},
        Choice,
    },
    service::storage::{MediaFolder, MediaStorage},
    util::{
        multipart::MultipartForm,
        pagination::{Page, PageRequest},
        parse,
    },
};

/// Number of identity document files expected in one upload.
const IDENTITY_DOCUMENT_COUNT: usize = 2;

/// Service for user profiles and personal KYC data.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a MediaStorage,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `storage` - Media storage for profile uploads
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection, storage: &'a MediaStorage) -> Self {
        Self { db, storage }
    }

    /// Gets a user's profile with their identity document album.
    ///
    /// # Returns
    /// - `Ok(Profile)` - The profile
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get_profile(&self, user_id: i32) -> Result<Profile, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.load_profile(user).await
    }

    /// Updates personal details and KYC documents from a multipart form.
    ///
    /// Uploaded files are written before the database transaction and removed again
    /// when any later step fails. A replaced display photo or proof of address is
    /// removed once the update is committed. Identity documents create the user's
    /// document album, which is only done once.
    ///
    /// # Arguments
    /// - `user` - The authenticated user
    /// - `form` - Buffered multipart form
    ///
    /// # Returns
    /// - `Ok(Profile)` - The updated profile, with the profile stage complete
    /// - `Err(AppError::ValidationErr)` - A field or file broke its rules
    /// - `Err(AppError::Conflict)` - The phone number belongs to another user
    pub async fn update_profile(
        &self,
        user: &User,
        form: &MultipartForm,
    ) -> Result<Profile, AppError> {
        let mut param = validate_profile_form(form)?;

        if let Some(phone) = &param.phone {
            if UserRepository::new(self.db)
                .phone_taken_by_other(phone, user.id)
                .await?
            {
                return Err(AppError::Conflict("phone already taken".to_string()));
            }
        }

        let mut written: Vec<String> = Vec::new();
        let result = self
            .store_and_update(user, form, &mut param, &mut written)
            .await;

        match result {
            Ok(updated) => self.load_profile(updated).await,
            Err(e) => {
                self.storage.discard(&written).await;
                Err(e)
            }
        }
    }

    /// Gets one page of agents ordered by id.
    pub async fn list_agents(&self, request: PageRequest) -> Result<Page<User>, AppError> {
        let (agents, total) = UserRepository::new(self.db)
            .get_agents_paginated(request)
            .await?;

        Page::new(agents, total, request)
    }

    async fn store_and_update(
        &self,
        user: &User,
        form: &MultipartForm,
        param: &mut UpdateProfileParam,
        written: &mut Vec<String>,
    ) -> Result<User, AppError> {
        if let Some(photo) = form.file("display_photo") {
            let stored = self
                .storage
                .store(MediaFolder::Users, MediaType::Image, photo)
                .await?;
            written.push(stored.path.clone());
            param.display_photo = Some(stored.path);
        }

        if let Some(document) = form.file("proof_of_address_document") {
            let stored = self
                .storage
                .store(MediaFolder::Users, MediaType::Document, document)
                .await?;
            written.push(stored.path.clone());
            param.proof_of_address_document = Some(stored.path);
        }

        let mut identity_documents: Vec<StoredFile> = Vec::new();
        if user.identity_document_album_id.is_none() {
            for document in form.files("identity_documents") {
                let stored = self
                    .storage
                    .store(MediaFolder::Users, MediaType::Document, document)
                    .await?;
                written.push(stored.path.clone());
                identity_documents.push(stored);
            }
        }

        let txn = self.db.begin().await?;
        let album_id = if identity_documents.is_empty() {
            None
        } else {
            let album = MediaRepository::new(&txn)
                .create_album(identity_documents)
                .await?;
            Some(album.id)
        };
        let updated = UserRepository::new(&txn)
            .update_profile(user.id, param.clone(), album_id)
            .await?;
        txn.commit().await?;

        let replaced: Vec<String> = [
            (&user.display_photo, &param.display_photo),
            (&user.proof_of_address_document, &param.proof_of_address_document),
        ]
        .into_iter()
        .filter_map(|(old, new)| match (old, new) {
            (Some(old), Some(new)) if old != new => Some(old.clone()),
            _ => None,
        })
        .collect();
        self.storage.discard(&replaced).await;

        tracing::info!("User {} updated their profile", user.id);

        Ok(updated)
    }

    async fn load_profile(&self, user: User) -> Result<Profile, AppError> {
        let identity_documents = MediaRepository::new(self.db)
            .get_optional_album(user.identity_document_album_id)
            .await?;

        Ok(Profile {
            user,
            identity_documents,
        })
    }
}

/// Validates the text fields and uploads of a profile update.
///
/// Stored file paths are filled in later, once the files are written.
fn validate_profile_form(form: &MultipartForm) -> Result<UpdateProfileParam, ValidationError> {
    let today = Utc::now().date_naive();

    let phone = form.text("phone").map(str::to_string);
    if let Some(phone) = &phone {
        parse::validate_digits("phone", phone, "phone must contain only digits")?;
    }

    let date_of_birth = form
        .text("date_of_birth")
        .map(|value| parse::parse_date("date_of_birth", value))
        .transpose()?;
    if date_of_birth.is_some_and(|date| date > today) {
        return Err(ValidationError::new(
            "date_of_birth",
            "date_of_birth cannot be a future date",
        ));
    }

    let identity_document_expiry_date = form
        .text("identity_document_expiry_date")
        .map(|value| parse::parse_date("identity_document_expiry_date", value))
        .transpose()?;
    if identity_document_expiry_date.is_some_and(|date| date <= today) {
        return Err(ValidationError::new(
            "identity_document_expiry_date",
            "identity_document_expiry_date should be a future date",
        ));
    }

    let document_type = form.required_text("identity_document_type")?;
    let identity_document_type = IdentityDocumentType::parse(document_type).ok_or_else(|| {
        ValidationError::new(
            "identity_document_type",
            format!(
                "\"{}\" is not a valid choice. Choose one of {}.",
                document_type,
                IdentityDocumentType::choices()
            ),
        )
    })?;

    if let Some(photo) = form.file("display_photo") {
        photo.validate_image("display_photo")?;
    }

    form.file("proof_of_address_document")
        .ok_or_else(|| ValidationError::new("proof_of_address_document", "No file was submitted."))?
        .validate_document("proof_of_address_document")?;

    let identity_documents = form.files("identity_documents");
    if !identity_documents.is_empty() && identity_documents.len() != IDENTITY_DOCUMENT_COUNT {
        return Err(ValidationError::new(
            "identity_documents",
            "Upload exactly 2 identity documents",
        ));
    }
    for document in identity_documents {
        document.validate_document("identity_documents")?;
    }

    Ok(UpdateProfileParam {
        firstname: form.text("firstname").map(str::to_string),
        lastname: form.text("lastname").map(str::to_string),
        date_of_birth,
        address: form.text("address").map(str::to_string),
        city: form.text("city").map(str::to_string),
        country: form.text("country").map(str::to_string),
        phone,
        identity_document_type: Some(identity_document_type),
        identity_document_number: form.text("identity_document_number").map(str::to_string),
        identity_document_expiry_date,
        display_photo: None,
        proof_of_address_document: None,
    })
}
