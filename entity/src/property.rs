//! Property entity - a listing published by an agent on behalf of their company.
//!
//! List-like attributes (`benefits`, `amenities`, `cross_streets`, `landmarks`) are JSON
//! string arrays and `scheduled_stays` is a JSON array of `[start, end]` date pairs.
//! Moderation, completion and ownership stage are stored as their string codes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub agent_id: i32,
    pub company_id: i32,
    pub company_name: String,
    #[sea_orm(column_type = "Text")]
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
    pub promotion_closing_date: Option<Date>,
    pub promotion_type: String,
    #[sea_orm(column_type = "Text")]
    pub other_deals: String,
    #[sea_orm(column_type = "Text")]
    pub other_incentives: String,
    pub image_album_id: Option<i32>,
    pub document_album_id: Option<i32>,
    pub default_image: Option<String>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_toilets: Option<i32>,
    pub benefits: Json,
    pub amenities: Json,
    pub erf_size: String,
    pub dining_area: String,
    pub cross_streets: Json,
    pub landmarks: Json,
    pub floor_size: String,
    pub date_built: Option<Date>,
    pub price_per_share: Option<i64>,
    pub completion_cost: Option<i64>,
    pub completion_date: Option<Date>,
    pub percentage_completed: Option<i32>,
    pub total_number_of_shares: Option<i32>,
    pub total_property_cost: Option<i64>,
    pub expected_roi: Option<i64>,
    pub area_rent_rolls: String,
    pub scheduled_stays: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AgentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Agent,
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_delete = "Cascade"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::media_album::Entity",
        from = "Column::ImageAlbumId",
        to = "super::media_album::Column::Id",
        on_delete = "SetNull"
    )]
    ImageAlbum,
    #[sea_orm(
        belongs_to = "super::media_album::Entity",
        from = "Column::DocumentAlbumId",
        to = "super::media_album::Column::Id",
        on_delete = "SetNull"
    )]
    DocumentAlbum,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
