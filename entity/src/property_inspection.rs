//! Property inspection entity - a site visit requested by a client.
//!
//! Agent, client and company details are copied onto the row when the visit is
//! scheduled so the request keeps the contact details it was made with.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property_inspections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub property_id: Uuid,
    pub agent_id: i32,
    pub agent_phone: Option<String>,
    pub agent_firstname: Option<String>,
    pub agent_lastname: Option<String>,
    pub company_name: Option<String>,
    pub client_id: i32,
    pub client_phone: Option<String>,
    pub client_firstname: Option<String>,
    pub client_lastname: Option<String>,
    pub inspection_date: DateTimeUtc,
    /// `PENDING`, `CANCELLED`, `REJECTED` or `ACCEPTED`
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id",
        on_delete = "Cascade"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AgentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Agent,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ClientId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
