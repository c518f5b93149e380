use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::media::MediaAlbumDto;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PropertyDto {
    pub id: Uuid,
    pub name: String,
    pub agent: i32,
    pub company: i32,
    pub company_name: String,
    pub description: String,
    pub moderation_status: String,
    pub archived: bool,
    pub completion_status: String,
    pub stage: String,
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
    pub image_album: Option<MediaAlbumDto>,
    pub document_album: Option<MediaAlbumDto>,
    pub default_image: Option<String>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_toilets: Option<i32>,
    pub benefits: Vec<String>,
    pub amenities: Vec<String>,
    #[serde(rename = "ERF_size")]
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
    #[serde(rename = "expected_ROI")]
    pub expected_roi: Option<i64>,
    pub area_rent_rolls: String,
    pub scheduled_stays: Vec<Vec<NaiveDate>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact listing row used by marketplace and agent listings.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PropertyListItemDto {
    pub id: Uuid,
    pub name: String,
    pub agent: i32,
    pub company_name: String,
    pub apartment_type: String,
    pub address: String,
    pub city: Option<String>,
    pub state: String,
    pub country: String,
    pub moderation_status: String,
    pub archived: bool,
    pub stage: String,
    pub percentage_sold: i32,
    pub price_per_share: Option<i64>,
    pub total_number_of_shares: Option<i32>,
    pub default_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ArchivePropertyDto {
    pub archived: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct StayPeriodsDto {
    /// Each period is a `[start, end]` pair of `YYYY-MM-DD` dates
    pub stay_periods: Vec<Vec<String>>,
}

#[derive(Serialize, Deserialize, IntoParams, Debug, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct MarketplaceQuery {
    /// 1-based page number
    pub page: Option<u64>,
    /// Case-insensitive city
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    /// `LISTING`, `MARKETPLACE` or `SOLD`
    pub stage: Option<String>,
}
