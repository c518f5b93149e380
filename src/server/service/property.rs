//! Property listing service.
//!
//! Listings are created and edited by the agent who owns them from multipart forms
//! carrying the listing fields along with image and document uploads. Uploaded files
//! are written to media storage first; the album and property rows follow in one
//! transaction, and the written files are discarded again when that transaction
//! cannot complete.

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{company::CompanyRepository, media::MediaRepository, property::PropertyRepository},
    error::{validation::ValidationError, AppError},
    model::{
        media::{MediaType, StoredFile},
        property::{
            CompletionStatus, CreatePropertyParam, MarketplaceFilter, Property, PropertyDetail,
            PropertyFields, StayPeriod, MAX_PRICE_PER_SHARE,
        },
        user::User,
        Choice,
    },
    service::storage::{MediaFolder, MediaStorage},
    util::{
        multipart::{MultipartForm, UploadedFile},
        pagination::{Page, PageRequest},
        parse,
    },
};

const MAX_IMAGES: usize = 5;
const MAX_DOCUMENTS: usize = 6;

/// Files written to storage for one request.
#[derive(Default)]
struct StoredUploads {
    images: Vec<StoredFile>,
    documents: Vec<StoredFile>,
    default_image: Option<String>,
    written: Vec<String>,
}

pub struct PropertyService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a MediaStorage,
}

impl<'a> PropertyService<'a> {
    /// Creates a new PropertyService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `storage` - Media storage for property uploads
    ///
    /// # Returns
    /// - `PropertyService` - New service instance
    pub fn new(db: &'a DatabaseConnection, storage: &'a MediaStorage) -> Self {
        Self { db, storage }
    }

    /// Creates a pending listing for the agent's company.
    ///
    /// # Arguments
    /// - `agent` - The listing agent
    /// - `form` - Buffered multipart form with fields and uploads
    ///
    /// # Returns
    /// - `Ok(Property)` - The new listing
    /// - `Err(AppError::ValidationErr)` - A field or upload broke its rules
    /// - `Err(AppError::BadRequest)` - The agent has not registered a business
    pub async fn create_property(
        &self,
        agent: &User,
        form: &MultipartForm,
    ) -> Result<Property, AppError> {
        let fields = property_fields(form, true)?;
        validate_uploads(form)?;

        let company = CompanyRepository::new(self.db)
            .find_by_user(agent.id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("register a business before listing a property".to_string())
            })?;

        let uploads = self.store_uploads(form).await?;
        let written = uploads.written.clone();

        let result = async {
            let txn = self.db.begin().await?;
            let (image_album_id, document_album_id) =
                create_albums(&txn, uploads.images, uploads.documents).await?;

            let property = PropertyRepository::new(&txn)
                .create(CreatePropertyParam {
                    id: Uuid::new_v4(),
                    agent_id: agent.id,
                    company_id: company.id,
                    company_name: company.display_name.clone(),
                    fields,
                    image_album_id,
                    document_album_id,
                    default_image: uploads.default_image,
                })
                .await?;
            txn.commit().await?;

            Ok::<_, AppError>(property)
        }
        .await;

        match result {
            Ok(property) => {
                tracing::info!("Agent {} listed property {}", agent.id, property.id);
                Ok(property)
            }
            Err(e) => {
                self.storage.discard(&written).await;
                Err(e)
            }
        }
    }

    /// Gets a listing of the agent with its albums.
    ///
    /// # Returns
    /// - `Ok(PropertyDetail)` - The property with image and document albums
    /// - `Err(AppError::NotFound)` - No property with that id
    /// - `Err(AppError::Forbidden)` - The property belongs to another agent
    pub async fn get_property(&self, agent: &User, id: Uuid) -> Result<PropertyDetail, AppError> {
        let property = self.owned_property(agent, id).await?;

        self.load_detail(property).await
    }

    /// Applies a partial update to one of the agent's listings.
    ///
    /// New images and documents are appended to the existing albums, creating an
    /// album when the property has none of that kind yet.
    pub async fn update_property(
        &self,
        agent: &User,
        id: Uuid,
        form: &MultipartForm,
    ) -> Result<PropertyDetail, AppError> {
        let fields = property_fields(form, false)?;
        validate_uploads(form)?;

        let property = self.owned_property(agent, id).await?;
        let uploads = self.store_uploads(form).await?;
        let written = uploads.written.clone();

        let result = async {
            let txn = self.db.begin().await?;
            let media_repo = MediaRepository::new(&txn);

            let mut new_image_album = None;
            match property.image_album_id {
                Some(album_id) if !uploads.images.is_empty() => {
                    media_repo.add_files(album_id, uploads.images).await?;
                }
                None if !uploads.images.is_empty() => {
                    new_image_album = Some(media_repo.create_album(uploads.images).await?.id);
                }
                _ => {}
            }

            let mut new_document_album = None;
            match property.document_album_id {
                Some(album_id) if !uploads.documents.is_empty() => {
                    media_repo.add_files(album_id, uploads.documents).await?;
                }
                None if !uploads.documents.is_empty() => {
                    new_document_album =
                        Some(media_repo.create_album(uploads.documents).await?.id);
                }
                _ => {}
            }

            let property_repo = PropertyRepository::new(&txn);
            property_repo
                .set_media(id, new_image_album, new_document_album, uploads.default_image)
                .await?;
            let updated = property_repo.update(id, fields).await?;
            txn.commit().await?;

            Ok::<_, AppError>(updated)
        }
        .await;

        match result {
            Ok(updated) => self.load_detail(updated).await,
            Err(e) => {
                self.storage.discard(&written).await;
                Err(e)
            }
        }
    }

    pub async fn archive_property(
        &self,
        agent: &User,
        id: Uuid,
        archived: bool,
    ) -> Result<Property, AppError> {
        self.owned_property(agent, id).await?;

        PropertyRepository::new(self.db)
            .set_archived(id, archived)
            .await
    }

    /// Removes one image or document from a listing along with its stored file.
    ///
    /// # Returns
    /// - `Ok(())` - Media removed
    /// - `Err(AppError::NotFound)` - Unknown property, or the file belongs to neither album
    /// - `Err(AppError::Forbidden)` - The property belongs to another agent
    pub async fn delete_media(
        &self,
        agent: &User,
        property_id: Uuid,
        media_id: i32,
    ) -> Result<(), AppError> {
        let property = self.owned_property(agent, property_id).await?;

        let media_repo = MediaRepository::new(self.db);
        let file = media_repo
            .find_file(media_id)
            .await?
            .filter(|file| property.album_ids().contains(&file.album_id))
            .ok_or_else(|| AppError::NotFound("Media not found".to_string()))?;

        media_repo.delete_file(file.id).await?;
        self.storage.delete(&file.path).await?;

        Ok(())
    }

    /// Gets one page of the public marketplace.
    pub async fn list_marketplace(
        &self,
        filter: &MarketplaceFilter,
        request: PageRequest,
    ) -> Result<Page<Property>, AppError> {
        let (properties, total) = PropertyRepository::new(self.db)
            .get_marketplace_paginated(filter, request)
            .await?;

        Page::new(properties, total, request)
    }

    pub async fn list_agent_properties(
        &self,
        agent_id: i32,
        request: PageRequest,
    ) -> Result<Page<Property>, AppError> {
        let (properties, total) = PropertyRepository::new(self.db)
            .get_by_agent_paginated(agent_id, request)
            .await?;

        Page::new(properties, total, request)
    }

    /// Appends stay periods to a listing.
    ///
    /// # Arguments
    /// - `agent` - The owning agent
    /// - `id` - Property id
    /// - `periods` - Raw `[start, end]` date pairs
    ///
    /// # Returns
    /// - `Ok(Vec<StayPeriod>)` - Every scheduled stay of the property
    /// - `Err(AppError::ValidationErr)` - No periods, or a period is malformed
    pub async fn add_stay_periods(
        &self,
        agent: &User,
        id: Uuid,
        periods: &[Vec<String>],
    ) -> Result<Vec<StayPeriod>, AppError> {
        if periods.is_empty() {
            return Err(ValidationError::new(
                "stay_periods",
                "Ensure this field has at least 1 elements.",
            )
            .into());
        }
        let new_periods = periods
            .iter()
            .map(|period| {
                let dates: Vec<&str> = period.iter().map(String::as_str).collect();
                parse::validate_stay_period("stay_periods", &dates)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let property = self.owned_property(agent, id).await?;
        let mut stays = property.scheduled_stays;
        stays.extend(new_periods);

        let updated = PropertyRepository::new(self.db)
            .set_scheduled_stays(id, &stays)
            .await?;

        Ok(updated.scheduled_stays)
    }

    pub async fn get_stay_periods(
        &self,
        agent: &User,
        id: Uuid,
    ) -> Result<Vec<StayPeriod>, AppError> {
        Ok(self.owned_property(agent, id).await?.scheduled_stays)
    }

    /// Removes the stay period at `index`, returning the remaining ones.
    pub async fn delete_stay_period(
        &self,
        agent: &User,
        id: Uuid,
        index: usize,
    ) -> Result<Vec<StayPeriod>, AppError> {
        let mut stays = self.owned_property(agent, id).await?.scheduled_stays;
        if index >= stays.len() {
            return Err(AppError::BadRequest(
                "Scheduled stay Index out of range".to_string(),
            ));
        }
        stays.remove(index);

        let updated = PropertyRepository::new(self.db)
            .set_scheduled_stays(id, &stays)
            .await?;

        Ok(updated.scheduled_stays)
    }

    /// Loads a property and checks the agent owns it.
    async fn owned_property(&self, agent: &User, id: Uuid) -> Result<Property, AppError> {
        let property = PropertyRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No property with that ID".to_string()))?;

        if property.agent_id != agent.id {
            return Err(AppError::Forbidden(
                "This resource belongs to another user".to_string(),
            ));
        }

        Ok(property)
    }

    async fn load_detail(&self, property: Property) -> Result<PropertyDetail, AppError> {
        let media_repo = MediaRepository::new(self.db);
        let image_album = media_repo.get_optional_album(property.image_album_id).await?;
        let document_album = media_repo
            .get_optional_album(property.document_album_id)
            .await?;

        Ok(PropertyDetail {
            property,
            image_album,
            document_album,
        })
    }

    /// Writes every upload of the form, removing them again if one write fails.
    async fn store_uploads(&self, form: &MultipartForm) -> Result<StoredUploads, AppError> {
        let mut uploads = StoredUploads::default();

        match self.write_uploads(form, &mut uploads).await {
            Ok(()) => Ok(uploads),
            Err(e) => {
                self.storage.discard(&uploads.written).await;
                Err(e)
            }
        }
    }

    async fn write_uploads(
        &self,
        form: &MultipartForm,
        uploads: &mut StoredUploads,
    ) -> Result<(), AppError> {
        for image in form.files("images") {
            let stored = self
                .storage
                .store(MediaFolder::Properties, MediaType::Image, image)
                .await?;
            uploads.written.push(stored.path.clone());
            uploads.images.push(stored);
        }

        for document in form.files("documents") {
            let stored = self
                .storage
                .store(MediaFolder::Properties, MediaType::Document, document)
                .await?;
            uploads.written.push(stored.path.clone());
            uploads.documents.push(stored);
        }

        if let Some(image) = form.file("default_image") {
            let path = self.storage.store_default_image(image).await?;
            uploads.written.push(path.clone());
            uploads.default_image = Some(path);
        }

        Ok(())
    }
}

/// Creates an album for each kind of upload that is present.
async fn create_albums(
    txn: &DatabaseTransaction,
    images: Vec<StoredFile>,
    documents: Vec<StoredFile>,
) -> Result<(Option<i32>, Option<i32>), AppError> {
    let media_repo = MediaRepository::new(txn);

    let image_album_id = if images.is_empty() {
        None
    } else {
        Some(media_repo.create_album(images).await?.id)
    };
    let document_album_id = if documents.is_empty() {
        None
    } else {
        Some(media_repo.create_album(documents).await?.id)
    };

    Ok((image_album_id, document_album_id))
}

fn validate_uploads(form: &MultipartForm) -> Result<(), ValidationError> {
    validate_file_list("images", form.files("images"), MAX_IMAGES, UploadedFile::validate_image)?;
    validate_file_list(
        "documents",
        form.files("documents"),
        MAX_DOCUMENTS,
        UploadedFile::validate_document,
    )?;

    if let Some(image) = form.file("default_image") {
        image.validate_image("default_image")?;
    }

    Ok(())
}

fn validate_file_list(
    field: &str,
    files: &[UploadedFile],
    max: usize,
    validate: fn(&UploadedFile, &str) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    if files.len() > max {
        return Err(ValidationError::new(
            field,
            format!("Ensure this field has no more than {} elements.", max),
        ));
    }

    files.iter().try_for_each(|file| validate(file, field))
}

/// Parses the listing fields of a create or update form.
///
/// With `creating` set the fields a new listing cannot do without are required.
fn property_fields(form: &MultipartForm, creating: bool) -> Result<PropertyFields, ValidationError> {
    let completion_status = form
        .text("completion_status")
        .map(|value| {
            CompletionStatus::parse(value).ok_or_else(|| {
                ValidationError::new(
                    "completion_status",
                    format!("\"{}\" is not a valid choice.", value),
                )
            })
        })
        .transpose()?;

    let scheduled_stays = form
        .text("scheduled_stays")
        .map(|value| parse::parse_stay_periods("scheduled_stays", value))
        .transpose()?;

    Ok(PropertyFields {
        name: text_field(form, "name", 256, creating)?,
        description: form.text("description").map(str::to_string),
        completion_status,
        apartment_type: text_field(form, "apartment_type", 255, creating)?,
        address: text_field(form, "address", 255, creating)?,
        city: text_field(form, "city", 50, false)?,
        state: text_field(form, "state", 50, creating)?,
        country: text_field(form, "country", 50, creating)?,
        zip_code: int_field(form, "zip_code", 0, i32::MAX as i64)?.map(|v| v as i32),
        percentage_discount: int_field(form, "percentage_discount", 0, 100)?.map(|v| v as i32),
        promotion_closing_date: date_field(form, "promotion_closing_date")?,
        promotion_type: text_field(form, "promotion_type", 255, false)?,
        other_deals: form.text("other_deals").map(str::to_string),
        other_incentives: form.text("other_incentives").map(str::to_string),
        number_of_bedrooms: int_field(form, "number_of_bedrooms", 0, i32::MAX as i64)?
            .map(|v| v as i32),
        number_of_toilets: int_field(form, "number_of_toilets", 0, i32::MAX as i64)?
            .map(|v| v as i32),
        benefits: form.text("benefits").map(parse::parse_comma_list),
        amenities: form.text("amenities").map(parse::parse_comma_list),
        erf_size: text_field(form, "ERF_size", 256, false)?,
        dining_area: text_field(form, "dining_area", 256, false)?,
        cross_streets: form.text("cross_streets").map(parse::parse_comma_list),
        landmarks: form.text("landmarks").map(parse::parse_comma_list),
        floor_size: text_field(form, "floor_size", 255, false)?,
        date_built: date_field(form, "date_built")?,
        price_per_share: int_field(form, "price_per_share", 0, MAX_PRICE_PER_SHARE)?,
        completion_cost: int_field(form, "completion_cost", 0, i64::MAX)?,
        completion_date: date_field(form, "completion_date")?,
        percentage_completed: int_field(form, "percentage_completed", 0, 100)?.map(|v| v as i32),
        total_number_of_shares: int_field(form, "total_number_of_shares", 0, i32::MAX as i64)?
            .map(|v| v as i32),
        total_property_cost: int_field(form, "total_property_cost", 0, i64::MAX)?,
        expected_roi: int_field(form, "expected_ROI", 0, i64::MAX)?,
        area_rent_rolls: text_field(form, "area_rent_rolls", 255, false)?,
        scheduled_stays,
    })
}

fn text_field(
    form: &MultipartForm,
    name: &str,
    max: usize,
    required: bool,
) -> Result<Option<String>, ValidationError> {
    match form.text(name) {
        Some(value) => {
            parse::validate_length(name, value, 1, max)?;
            Ok(Some(value.to_string()))
        }
        None if required => Err(ValidationError::required(name)),
        None => Ok(None),
    }
}

fn int_field(
    form: &MultipartForm,
    name: &str,
    min: i64,
    max: i64,
) -> Result<Option<i64>, ValidationError> {
    form.text(name)
        .map(|value| parse::parse_bounded_int(name, value, min, max))
        .transpose()
}

fn date_field(
    form: &MultipartForm,
    name: &str,
) -> Result<Option<chrono::NaiveDate>, ValidationError> {
    form.text(name)
        .map(|value| parse::parse_date(name, value))
        .transpose()
}
