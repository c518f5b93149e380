//! Property domain models and parameters.
//!
//! A property moves through moderation (`PENDING` until staff decide) and, once
//! approved, through its ownership stage `LISTING -> MARKETPLACE -> SOLD`.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    model::property::{MarketplaceQuery, PropertyDto, PropertyListItemDto},
    server::{
        error::{validation::ValidationError, AppError},
        model::{
            from_json_column,
            media::{media_url, MediaAlbum},
            Choice,
        },
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl Choice for ModerationStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Approved, Self::Rejected];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    InProgress,
    Completed,
}

impl Choice for CompletionStatus {
    const ALL: &'static [Self] = &[Self::InProgress, Self::Completed];

    fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN-PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

/// Sale lifecycle of an approved property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipStage {
    Listing,
    Marketplace,
    Sold,
}

impl OwnershipStage {
    /// Stage reached after an ownership request is approved. `Sold` is terminal.
    pub fn advance(self) -> Self {
        match self {
            Self::Listing => Self::Marketplace,
            Self::Marketplace | Self::Sold => Self::Sold,
        }
    }
}

impl Choice for OwnershipStage {
    const ALL: &'static [Self] = &[Self::Listing, Self::Marketplace, Self::Sold];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Listing => "LISTING",
            Self::Marketplace => "MARKETPLACE",
            Self::Sold => "SOLD",
        }
    }
}

/// A `[start, end]` stay period.
pub type StayPeriod = [NaiveDate; 2];

/// Encodes stay periods as the stored JSON list of `["YYYY-MM-DD", "YYYY-MM-DD"]` pairs.
pub fn stays_to_json(stays: &[StayPeriod]) -> serde_json::Value {
    serde_json::Value::Array(
        stays
            .iter()
            .map(|[start, end]| serde_json::Value::from(vec![start.to_string(), end.to_string()]))
            .collect(),
    )
}

/// Highest accepted `price_per_share`. Any share count that fits in an `i32`
/// times this price still fits in an `i64`.
pub const MAX_PRICE_PER_SHARE: i64 = i64::MAX / i32::MAX as i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub agent_id: i32,
    pub company_id: i32,
    pub company_name: String,
    pub description: String,
    pub moderation_status: ModerationStatus,
    pub archived: bool,
    pub completion_status: CompletionStatus,
    pub stage: OwnershipStage,
    pub percentage_sold: i32,
    pub apartment_type: String,
    pub address: String,
    pub city: Option<String>,
    pub state: String,
    pub country: String,
    pub zip_code: Option<i32>,
    pub percentage_discount: Option<i32>,
    pub promotion_closing_date: Option<NaiveDate>,
    pub promotion_type: String,
    pub other_deals: String,
    pub other_incentives: String,
    pub image_album_id: Option<i32>,
    pub document_album_id: Option<i32>,
    pub default_image: Option<String>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_toilets: Option<i32>,
    pub benefits: Vec<String>,
    pub amenities: Vec<String>,
    pub erf_size: String,
    pub dining_area: String,
    pub cross_streets: Vec<String>,
    pub landmarks: Vec<String>,
    pub floor_size: String,
    pub date_built: Option<NaiveDate>,
    pub price_per_share: Option<i64>,
    pub completion_cost: Option<i64>,
    pub completion_date: Option<NaiveDate>,
    pub percentage_completed: Option<i32>,
    pub total_number_of_shares: Option<i32>,
    pub total_property_cost: Option<i64>,
    pub expected_roi: Option<i64>,
    pub area_rent_rolls: String,
    pub scheduled_stays: Vec<StayPeriod>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Converts an entity model to a property domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Property)` - The converted property
    /// - `Err(AppError::InternalErr)` - A status column or JSON list column is corrupt
    pub fn from_entity(entity: entity::property::Model) -> Result<Self, AppError> {
        Ok(Self {
            moderation_status: ModerationStatus::from_column(
                "moderation_status",
                &entity.moderation_status,
            )?,
            completion_status: CompletionStatus::from_column(
                "completion_status",
                &entity.completion_status,
            )?,
            stage: OwnershipStage::from_column("stage", &entity.stage)?,
            benefits: from_json_column("benefits", entity.benefits)?,
            amenities: from_json_column("amenities", entity.amenities)?,
            cross_streets: from_json_column("cross_streets", entity.cross_streets)?,
            landmarks: from_json_column("landmarks", entity.landmarks)?,
            scheduled_stays: from_json_column("scheduled_stays", entity.scheduled_stays)?,
            id: entity.id,
            name: entity.name,
            agent_id: entity.agent_id,
            company_id: entity.company_id,
            company_name: entity.company_name,
            description: entity.description,
            archived: entity.archived,
            percentage_sold: entity.percentage_sold,
            apartment_type: entity.apartment_type,
            address: entity.address,
            city: entity.city,
            state: entity.state,
            country: entity.country,
            zip_code: entity.zip_code,
            percentage_discount: entity.percentage_discount,
            promotion_closing_date: entity.promotion_closing_date,
            promotion_type: entity.promotion_type,
            other_deals: entity.other_deals,
            other_incentives: entity.other_incentives,
            image_album_id: entity.image_album_id,
            document_album_id: entity.document_album_id,
            default_image: entity.default_image,
            number_of_bedrooms: entity.number_of_bedrooms,
            number_of_toilets: entity.number_of_toilets,
            erf_size: entity.erf_size,
            dining_area: entity.dining_area,
            floor_size: entity.floor_size,
            date_built: entity.date_built,
            price_per_share: entity.price_per_share,
            completion_cost: entity.completion_cost,
            completion_date: entity.completion_date,
            percentage_completed: entity.percentage_completed,
            total_number_of_shares: entity.total_number_of_shares,
            total_property_cost: entity.total_property_cost,
            expected_roi: entity.expected_roi,
            area_rent_rolls: entity.area_rent_rolls,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Whether customers may buy shares or book visits.
    pub fn is_available(&self) -> bool {
        self.moderation_status == ModerationStatus::Approved && !self.archived
    }

    /// Album ids of the property, images first.
    pub fn album_ids(&self) -> Vec<i32> {
        self.image_album_id
            .into_iter()
            .chain(self.document_album_id)
            .collect()
    }

    pub fn into_dto(
        self,
        app_url: &str,
        image_album: Option<MediaAlbum>,
        document_album: Option<MediaAlbum>,
    ) -> PropertyDto {
        PropertyDto {
            id: self.id,
            name: self.name,
            agent: self.agent_id,
            company: self.company_id,
            company_name: self.company_name,
            description: self.description,
            moderation_status: self.moderation_status.as_str().to_string(),
            archived: self.archived,
            completion_status: self.completion_status.as_str().to_string(),
            stage: self.stage.as_str().to_string(),
            percentage_sold: self.percentage_sold,
            apartment_type: self.apartment_type,
            address: self.address,
            city: self.city,
            state: self.state,
            country: self.country,
            zip_code: self.zip_code,
            percentage_discount: self.percentage_discount,
            promotion_closing_date: self.promotion_closing_date,
            promotion_type: self.promotion_type,
            other_deals: self.other_deals,
            other_incentives: self.other_incentives,
            image_album: image_album.map(|album| album.into_dto(app_url)),
            document_album: document_album.map(|album| album.into_dto(app_url)),
            default_image: self.default_image.map(|path| media_url(app_url, &path)),
            number_of_bedrooms: self.number_of_bedrooms,
            number_of_toilets: self.number_of_toilets,
            benefits: self.benefits,
            amenities: self.amenities,
            erf_size: self.erf_size,
            dining_area: self.dining_area,
            cross_streets: self.cross_streets,
            landmarks: self.landmarks,
            floor_size: self.floor_size,
            date_built: self.date_built,
            price_per_share: self.price_per_share,
            completion_cost: self.completion_cost,
            completion_date: self.completion_date,
            percentage_completed: self.percentage_completed,
            total_number_of_shares: self.total_number_of_shares,
            total_property_cost: self.total_property_cost,
            expected_roi: self.expected_roi,
            area_rent_rolls: self.area_rent_rolls,
            scheduled_stays: self
                .scheduled_stays
                .into_iter()
                .map(|period| period.to_vec())
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn into_list_item_dto(self, app_url: &str) -> PropertyListItemDto {
        PropertyListItemDto {
            id: self.id,
            name: self.name,
            agent: self.agent_id,
            company_name: self.company_name,
            apartment_type: self.apartment_type,
            address: self.address,
            city: self.city,
            state: self.state,
            country: self.country,
            moderation_status: self.moderation_status.as_str().to_string(),
            archived: self.archived,
            stage: self.stage.as_str().to_string(),
            percentage_sold: self.percentage_sold,
            price_per_share: self.price_per_share,
            total_number_of_shares: self.total_number_of_shares,
            default_image: self.default_image.map(|path| media_url(app_url, &path)),
            created_at: self.created_at,
        }
    }
}

/// A property with both of its albums loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDetail {
    pub property: Property,
    pub image_album: Option<MediaAlbum>,
    pub document_album: Option<MediaAlbum>,
}

impl PropertyDetail {
    pub fn into_dto(self, app_url: &str) -> PropertyDto {
        self.property
            .into_dto(app_url, self.image_album, self.document_album)
    }
}

/// Editable property attributes. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub completion_status: Option<CompletionStatus>,
    pub apartment_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<i32>,
    pub percentage_discount: Option<i32>,
    pub promotion_closing_date: Option<NaiveDate>,
    pub promotion_type: Option<String>,
    pub other_deals: Option<String>,
    pub other_incentives: Option<String>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_toilets: Option<i32>,
    pub benefits: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub erf_size: Option<String>,
    pub dining_area: Option<String>,
    pub cross_streets: Option<Vec<String>>,
    pub landmarks: Option<Vec<String>>,
    pub floor_size: Option<String>,
    pub date_built: Option<NaiveDate>,
    pub price_per_share: Option<i64>,
    pub completion_cost: Option<i64>,
    pub completion_date: Option<NaiveDate>,
    pub percentage_completed: Option<i32>,
    pub total_number_of_shares: Option<i32>,
    pub total_property_cost: Option<i64>,
    pub expected_roi: Option<i64>,
    pub area_rent_rolls: Option<String>,
    pub scheduled_stays: Option<Vec<StayPeriod>>,
}

/// Parameters for inserting a new listing.
#[derive(Debug, Clone)]
pub struct CreatePropertyParam {
    pub id: Uuid,
    pub agent_id: i32,
    pub company_id: i32,
    pub company_name: String,
    pub fields: PropertyFields,
    pub image_album_id: Option<i32>,
    pub document_album_id: Option<i32>,
    pub default_image: Option<String>,
}

/// Optional filters of the public marketplace listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketplaceFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub stage: Option<OwnershipStage>,
}

impl MarketplaceFilter {
    /// Builds the filter from query parameters, ignoring blank values.
    ///
    /// # Returns
    /// - `Ok(MarketplaceFilter)` - Filter ready for the repository
    /// - `Err(ValidationError)` - `stage` is not LISTING, MARKETPLACE or SOLD
    pub fn from_query(query: &MarketplaceQuery) -> Result<Self, ValidationError> {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let stage = match text(&query.stage) {
            None => None,
            Some(stage) => Some(OwnershipStage::parse(&stage.to_uppercase()).ok_or_else(|| {
                ValidationError::new(
                    "stage",
                    format!(
                        "\"{}\" is not a valid choice. Choose one of {}.",
                        stage,
                        OwnershipStage::choices()
                    ),
                )
            })?),
        };

        Ok(Self {
            city: text(&query.city),
            state: text(&query.state),
            country: text(&query.country),
            stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marketplace_filter_reads_query() {
        let query = MarketplaceQuery {
            city: Some(" Lagos ".to_string()),
            state: Some("".to_string()),
            stage: Some("marketplace".to_string()),
            ..Default::default()
        };

        let filter = MarketplaceFilter::from_query(&query).unwrap();

        assert_eq!(filter.city.as_deref(), Some("Lagos"));
        assert_eq!(filter.state, None);
        assert_eq!(filter.stage, Some(OwnershipStage::Marketplace));

        let bad = MarketplaceQuery {
            stage: Some("RENTED".to_string()),
            ..Default::default()
        };
        assert_eq!(
            MarketplaceFilter::from_query(&bad).unwrap_err().field,
            "stage"
        );
    }

    #[test]
    fn stage_advances_until_sold() {
        assert_eq!(OwnershipStage::Listing.advance(), OwnershipStage::Marketplace);
        assert_eq!(OwnershipStage::Marketplace.advance(), OwnershipStage::Sold);
        assert_eq!(OwnershipStage::Sold.advance(), OwnershipStage::Sold);
    }

    #[test]
    fn stays_round_trip_through_json_column() {
        let stays = vec![[
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        ]];

        let json = stays_to_json(&stays);
        assert_eq!(json, serde_json::json!([["2026-01-01", "2026-01-05"]]));

        let decoded: Vec<StayPeriod> = from_json_column("scheduled_stays", json).unwrap();
        assert_eq!(decoded, stays);
    }

    #[test]
    fn parses_stored_codes() {
        assert_eq!(
            CompletionStatus::parse("IN-PROGRESS"),
            Some(CompletionStatus::InProgress)
        );
        assert_eq!(ModerationStatus::parse("approved"), None);
        assert!(OwnershipStage::from_column("stage", "GONE").is_err());
    }
}
