//! Property data repository for database operations.
//!
//! This module provides the `PropertyRepository` for listings. It handles inserts from
//! validated property fields, partial updates, the moderation and ownership stage
//! columns, and the paginated marketplace, agent and moderation listings.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use serde_json::Value;
use uuid::Uuid;

use crate::server::{
    data::{set_if_some, set_optional},
    error::AppError,
    model::{
        property::{
            stays_to_json, CompletionStatus, CreatePropertyParam, MarketplaceFilter,
            ModerationStatus, OwnershipStage, Property, PropertyFields, StayPeriod,
        },
        Choice,
    },
    util::pagination::{PageRequest, PAGE_SIZE},
};

/// Repository providing database operations for property listings.
pub struct PropertyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PropertyRepository<'a, C> {
    /// Creates a new PropertyRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `PropertyRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new pending listing in the `LISTING` stage.
    ///
    /// Missing optional text fields are stored as empty strings and missing lists as
    /// empty JSON arrays.
    ///
    /// # Arguments
    /// - `param` - Owner, company snapshot, validated fields and album references
    ///
    /// # Returns
    /// - `Ok(Property)` - The created property
    /// - `Err(AppError)` - Insert failed
    pub async fn create(&self, param: CreatePropertyParam) -> Result<Property, AppError> {
        let now = Utc::now();
        let fields = param.fields;

        let entity = entity::property::ActiveModel {
            id: ActiveValue::Set(param.id),
            name: ActiveValue::Set(fields.name.unwrap_or_default()),
            agent_id: ActiveValue::Set(param.agent_id),
            company_id: ActiveValue::Set(param.company_id),
            company_name: ActiveValue::Set(param.company_name),
            description: ActiveValue::Set(fields.description.unwrap_or_default()),
            moderation_status: ActiveValue::Set(ModerationStatus::Pending.as_str().to_string()),
            archived: ActiveValue::Set(false),
            completion_status: ActiveValue::Set(
                fields
                    .completion_status
                    .unwrap_or(CompletionStatus::InProgress)
                    .as_str()
                    .to_string(),
            ),
            stage: ActiveValue::Set(OwnershipStage::Listing.as_str().to_string()),
            percentage_sold: ActiveValue::Set(0),
            apartment_type: ActiveValue::Set(fields.apartment_type.unwrap_or_default()),
            address: ActiveValue::Set(fields.address.unwrap_or_default()),
            city: ActiveValue::Set(fields.city),
            state: ActiveValue::Set(fields.state.unwrap_or_default()),
            country: ActiveValue::Set(fields.country.unwrap_or_default()),
            zip_code: ActiveValue::Set(fields.zip_code),
            percentage_discount: ActiveValue::Set(fields.percentage_discount),
            promotion_closing_date: ActiveValue::Set(fields.promotion_closing_date),
            promotion_type: ActiveValue::Set(fields.promotion_type.unwrap_or_default()),
            other_deals: ActiveValue::Set(fields.other_deals.unwrap_or_default()),
            other_incentives: ActiveValue::Set(fields.other_incentives.unwrap_or_default()),
            image_album_id: ActiveValue::Set(param.image_album_id),
            document_album_id: ActiveValue::Set(param.document_album_id),
            default_image: ActiveValue::Set(param.default_image),
            number_of_bedrooms: ActiveValue::Set(fields.number_of_bedrooms),
            number_of_toilets: ActiveValue::Set(fields.number_of_toilets),
            benefits: ActiveValue::Set(list_to_json(fields.benefits)),
            amenities: ActiveValue::Set(list_to_json(fields.amenities)),
            erf_size: ActiveValue::Set(fields.erf_size.unwrap_or_default()),
            dining_area: ActiveValue::Set(fields.dining_area.unwrap_or_default()),
            cross_streets: ActiveValue::Set(list_to_json(fields.cross_streets)),
            landmarks: ActiveValue::Set(list_to_json(fields.landmarks)),
            floor_size: ActiveValue::Set(fields.floor_size.unwrap_or_default()),
            date_built: ActiveValue::Set(fields.date_built),
            price_per_share: ActiveValue::Set(fields.price_per_share),
            completion_cost: ActiveValue::Set(fields.completion_cost),
            completion_date: ActiveValue::Set(fields.completion_date),
            percentage_completed: ActiveValue::Set(fields.percentage_completed),
            total_number_of_shares: ActiveValue::Set(fields.total_number_of_shares),
            total_property_cost: ActiveValue::Set(fields.total_property_cost),
            expected_roi: ActiveValue::Set(fields.expected_roi),
            area_rent_rolls: ActiveValue::Set(fields.area_rent_rolls.unwrap_or_default()),
            scheduled_stays: ActiveValue::Set(stays_to_json(
                &fields.scheduled_stays.unwrap_or_default(),
            )),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Property::from_entity(entity)
    }

    /// Finds a property by id.
    ///
    /// # Returns
    /// - `Ok(Some(Property))` - Property found
    /// - `Ok(None)` - No property with that id
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, AppError> {
        entity::prelude::Property::find_by_id(id)
            .one(self.db)
            .await?
            .map(Property::from_entity)
            .transpose()
    }

    /// Applies a partial update. Only `Some` fields are written.
    ///
    /// # Returns
    /// - `Ok(Property)` - The updated property
    /// - `Err(AppError)` - Property missing or update failed
    pub async fn update(&self, id: Uuid, fields: PropertyFields) -> Result<Property, AppError> {
        let mut active_model = self.find_active_model(id).await?;

        set_if_some(&mut active_model.name, fields.name);
        set_if_some(&mut active_model.description, fields.description);
        set_if_some(
            &mut active_model.completion_status,
            fields
                .completion_status
                .map(|status| status.as_str().to_string()),
        );
        set_if_some(&mut active_model.apartment_type, fields.apartment_type);
        set_if_some(&mut active_model.address, fields.address);
        set_optional(&mut active_model.city, fields.city);
        set_if_some(&mut active_model.state, fields.state);
        set_if_some(&mut active_model.country, fields.country);
        set_optional(&mut active_model.zip_code, fields.zip_code);
        set_optional(
            &mut active_model.percentage_discount,
            fields.percentage_discount,
        );
        set_optional(
            &mut active_model.promotion_closing_date,
            fields.promotion_closing_date,
        );
        set_if_some(&mut active_model.promotion_type, fields.promotion_type);
        set_if_some(&mut active_model.other_deals, fields.other_deals);
        set_if_some(&mut active_model.other_incentives, fields.other_incentives);
        set_optional(&mut active_model.number_of_bedrooms, fields.number_of_bedrooms);
        set_optional(&mut active_model.number_of_toilets, fields.number_of_toilets);
        set_if_some(&mut active_model.benefits, fields.benefits.map(Value::from));
        set_if_some(&mut active_model.amenities, fields.amenities.map(Value::from));
        set_if_some(&mut active_model.erf_size, fields.erf_size);
        set_if_some(&mut active_model.dining_area, fields.dining_area);
        set_if_some(
            &mut active_model.cross_streets,
            fields.cross_streets.map(Value::from),
        );
        set_if_some(&mut active_model.landmarks, fields.landmarks.map(Value::from));
        set_if_some(&mut active_model.floor_size, fields.floor_size);
        set_optional(&mut active_model.date_built, fields.date_built);
        set_optional(&mut active_model.price_per_share, fields.price_per_share);
        set_optional(&mut active_model.completion_cost, fields.completion_cost);
        set_optional(&mut active_model.completion_date, fields.completion_date);
        set_optional(
            &mut active_model.percentage_completed,
            fields.percentage_completed,
        );
        set_optional(
            &mut active_model.total_number_of_shares,
            fields.total_number_of_shares,
        );
        set_optional(
            &mut active_model.total_property_cost,
            fields.total_property_cost,
        );
        set_optional(&mut active_model.expected_roi, fields.expected_roi);
        set_if_some(&mut active_model.area_rent_rolls, fields.area_rent_rolls);
        set_if_some(
            &mut active_model.scheduled_stays,
            fields.scheduled_stays.map(|stays| stays_to_json(&stays)),
        );
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Property::from_entity(active_model.update(self.db).await?)
    }

    /// Points the property at its albums and default image. `None` keeps the current value.
    pub async fn set_media(
        &self,
        id: Uuid,
        image_album_id: Option<i32>,
        document_album_id: Option<i32>,
        default_image: Option<String>,
    ) -> Result<Property, AppError> {
        let mut active_model = self.find_active_model(id).await?;
        set_optional(&mut active_model.image_album_id, image_album_id);
        set_optional(&mut active_model.document_album_id, document_album_id);
        set_optional(&mut active_model.default_image, default_image);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Property::from_entity(active_model.update(self.db).await?)
    }

    pub async fn set_archived(&self, id: Uuid, archived: bool) -> Result<Property, AppError> {
        let mut active_model = self.find_active_model(id).await?;
        active_model.archived = ActiveValue::Set(archived);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Property::from_entity(active_model.update(self.db).await?)
    }

    /// Replaces the scheduled stays list.
    pub async fn set_scheduled_stays(
        &self,
        id: Uuid,
        stays: &[StayPeriod],
    ) -> Result<Property, AppError> {
        let mut active_model = self.find_active_model(id).await?;
        active_model.scheduled_stays = ActiveValue::Set(stays_to_json(stays));
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Property::from_entity(active_model.update(self.db).await?)
    }

    pub async fn set_moderation_status(
        &self,
        id: Uuid,
        status: ModerationStatus,
    ) -> Result<Property, AppError> {
        let mut active_model = self.find_active_model(id).await?;
        active_model.moderation_status = ActiveValue::Set(status.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Property::from_entity(active_model.update(self.db).await?)
    }

    /// Records an approved ownership sale.
    ///
    /// # Arguments
    /// - `id` - Property sold from
    /// - `stage` - Stage after the sale
    /// - `percentage_sold` - New total percentage sold, already capped at 100
    pub async fn record_sale(
        &self,
        id: Uuid,
        stage: OwnershipStage,
        percentage_sold: i32,
    ) -> Result<Property, AppError> {
        let mut active_model = self.find_active_model(id).await?;
        active_model.stage = ActiveValue::Set(stage.as_str().to_string());
        active_model.percentage_sold = ActiveValue::Set(percentage_sold);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Property::from_entity(active_model.update(self.db).await?)
    }

    /// Gets one page of approved, unarchived properties, newest first.
    ///
    /// Location filters compare case-insensitively.
    ///
    /// # Returns
    /// - `Ok((properties, total))` - Properties on the page and the filtered total
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn get_marketplace_paginated(
        &self,
        filter: &MarketplaceFilter,
        request: PageRequest,
    ) -> Result<(Vec<Property>, u64), AppError> {
        let mut query = entity::prelude::Property::find()
            .filter(
                entity::property::Column::ModerationStatus
                    .eq(ModerationStatus::Approved.as_str()),
            )
            .filter(entity::property::Column::Archived.eq(false));

        if let Some(city) = &filter.city {
            query = query.filter(lower_eq(entity::property::Column::City, city));
        }
        if let Some(state) = &filter.state {
            query = query.filter(lower_eq(entity::property::Column::State, state));
        }
        if let Some(country) = &filter.country {
            query = query.filter(lower_eq(entity::property::Column::Country, country));
        }
        if let Some(stage) = filter.stage {
            query = query.filter(entity::property::Column::Stage.eq(stage.as_str()));
        }

        self.paginate(
            query.order_by_desc(entity::property::Column::CreatedAt),
            request,
        )
        .await
    }

    /// Gets one page of an agent's properties, newest first.
    pub async fn get_by_agent_paginated(
        &self,
        agent_id: i32,
        request: PageRequest,
    ) -> Result<(Vec<Property>, u64), AppError> {
        let query = entity::prelude::Property::find()
            .filter(entity::property::Column::AgentId.eq(agent_id))
            .order_by_desc(entity::property::Column::CreatedAt);

        self.paginate(query, request).await
    }

    /// Every property of an agent, newest first.
    pub async fn get_by_agent(&self, agent_id: i32) -> Result<Vec<Property>, AppError> {
        entity::prelude::Property::find()
            .filter(entity::property::Column::AgentId.eq(agent_id))
            .order_by_desc(entity::property::Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Property::from_entity)
            .collect()
    }

    /// Gets one page of properties awaiting moderation, oldest first.
    pub async fn get_pending_paginated(
        &self,
        request: PageRequest,
    ) -> Result<(Vec<Property>, u64), AppError> {
        let query = entity::prelude::Property::find()
            .filter(
                entity::property::Column::ModerationStatus.eq(ModerationStatus::Pending.as_str()),
            )
            .order_by_asc(entity::property::Column::CreatedAt);

        self.paginate(query, request).await
    }

    async fn paginate(
        &self,
        query: Select<entity::prelude::Property>,
        request: PageRequest,
    ) -> Result<(Vec<Property>, u64), AppError> {
        let paginator = query.paginate(self.db, PAGE_SIZE);

        let total = paginator.num_items().await?;
        let properties = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(Property::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((properties, total))
    }

    async fn find_active_model(&self, id: Uuid) -> Result<entity::property::ActiveModel, DbErr> {
        let model = entity::prelude::Property::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Property with id {} not found",
                id
            )))?;

        Ok(model.into())
    }
}

fn list_to_json(list: Option<Vec<String>>) -> Value {
    Value::from(list.unwrap_or_default())
}

fn lower_eq(column: entity::property::Column, value: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).eq(value.to_lowercase())
}
