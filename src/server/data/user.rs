//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing marketplace accounts. It
//! handles signup inserts, lookups, profile updates and the onboarding stage maps,
//! converting between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{set_if_some, set_optional},
    error::AppError,
    model::{
        from_json_column,
        user::{CreateUserParam, OnboardingStage, Role, Stages, UpdateProfileParam, User},
        Choice,
    },
    util::pagination::{PageRequest, PAGE_SIZE},
};

/// Repository providing database operations for user management.
///
/// Generic over the connection so the same queries run on the pool or inside an
/// open transaction.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a freshly signed up, unverified user.
    ///
    /// Both stage maps start with every stage unset.
    ///
    /// # Arguments
    /// - `param` - Normalised email, password hash, names and role
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::DbErr)` - Insert failed, e.g. the email is taken
    pub async fn create(&self, param: CreateUserParam) -> Result<User, AppError> {
        let now = Utc::now();
        let stages = Stages::default().to_json();

        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(param.email),
            password_hash: ActiveValue::Set(param.password_hash),
            firstname: ActiveValue::Set(param.firstname),
            lastname: ActiveValue::Set(param.lastname),
            phone: ActiveValue::Set(None),
            secondary_phone: ActiveValue::Set(None),
            is_verified: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            is_staff: ActiveValue::Set(false),
            auth_provider: ActiveValue::Set("email".to_string()),
            role: ActiveValue::Set(param.role.as_str().to_string()),
            nationality: ActiveValue::Set(None),
            agency: ActiveValue::Set(None),
            title: ActiveValue::Set(None),
            summary: ActiveValue::Set(String::new()),
            date_of_birth: ActiveValue::Set(None),
            address: ActiveValue::Set(None),
            city: ActiveValue::Set(None),
            country: ActiveValue::Set(None),
            identity_document_type: ActiveValue::Set(None),
            identity_document_number: ActiveValue::Set(None),
            identity_document_expiry_date: ActiveValue::Set(None),
            identity_document_album_id: ActiveValue::Set(None),
            display_photo: ActiveValue::Set(None),
            proof_of_address_document: ActiveValue::Set(None),
            stages_of_profile_completion: ActiveValue::Set(stages.clone()),
            stages_of_kyc_verification: ActiveValue::Set(stages),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by primary key.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds a user by their normalised email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Loads multiple users at once, in no particular order.
    pub async fn find_by_ids(&self, user_ids: Vec<i32>) -> Result<Vec<User>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether a phone number belongs to anyone other than `user_id`.
    pub async fn phone_taken_by_other(&self, phone: &str, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Phone.eq(phone))
            .filter(entity::user::Column::Id.ne(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets one page of agents ordered by id.
    ///
    /// # Returns
    /// - `Ok((agents, total))` - Agents on the requested page and the total agent count
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn get_agents_paginated(
        &self,
        request: PageRequest,
    ) -> Result<(Vec<User>, u64), AppError> {
        let paginator = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(Role::Agent.as_str()))
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, PAGE_SIZE);

        let total = paginator.num_items().await?;
        let agents = paginator
            .fetch_page(request.index())
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((agents, total))
    }

    /// Applies a profile update and marks the profile stage complete.
    ///
    /// Only `Some` fields of `param` are written.
    ///
    /// # Arguments
    /// - `user_id` - User to update
    /// - `param` - Validated profile fields and stored file paths
    /// - `identity_document_album_id` - Album to attach when one was just created
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::DbErr)` - User missing or update failed
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
        identity_document_album_id: Option<i32>,
    ) -> Result<User, AppError> {
        let model = self.find_model(user_id).await?;
        let mut stages: Stages = from_json_column(
            "stages_of_profile_completion",
            model.stages_of_profile_completion.clone(),
        )?;
        stages.set(OnboardingStage::Profile, true);

        let mut active_model: entity::user::ActiveModel = model.into();
        set_if_some(&mut active_model.firstname, param.firstname);
        set_if_some(&mut active_model.lastname, param.lastname);
        set_optional(&mut active_model.date_of_birth, param.date_of_birth);
        set_optional(&mut active_model.address, param.address);
        set_optional(&mut active_model.city, param.city);
        set_optional(&mut active_model.country, param.country);
        set_optional(&mut active_model.phone, param.phone);
        set_optional(
            &mut active_model.identity_document_type,
            param
                .identity_document_type
                .map(|kind| kind.as_str().to_string()),
        );
        set_optional(
            &mut active_model.identity_document_number,
            param.identity_document_number,
        );
        set_optional(
            &mut active_model.identity_document_expiry_date,
            param.identity_document_expiry_date,
        );
        set_optional(&mut active_model.display_photo, param.display_photo);
        set_optional(
            &mut active_model.proof_of_address_document,
            param.proof_of_address_document,
        );
        set_optional(
            &mut active_model.identity_document_album_id,
            identity_document_album_id,
        );
        active_model.stages_of_profile_completion = ActiveValue::Set(stages.to_json());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        User::from_entity(active_model.update(self.db).await?)
    }

    /// Sets one stage of the profile completion map.
    pub async fn set_profile_stage(
        &self,
        user_id: i32,
        stage: OnboardingStage,
        value: bool,
    ) -> Result<User, AppError> {
        let model = self.find_model(user_id).await?;
        let mut stages: Stages = from_json_column(
            "stages_of_profile_completion",
            model.stages_of_profile_completion.clone(),
        )?;
        stages.set(stage, value);

        let mut active_model: entity::user::ActiveModel = model.into();
        active_model.stages_of_profile_completion = ActiveValue::Set(stages.to_json());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        User::from_entity(active_model.update(self.db).await?)
    }

    /// Records a staff KYC decision on both stage maps.
    pub async fn set_kyc_stage(
        &self,
        user_id: i32,
        stage: OnboardingStage,
        approved: bool,
    ) -> Result<User, AppError> {
        let model = self.find_model(user_id).await?;
        let mut profile_stages: Stages = from_json_column(
            "stages_of_profile_completion",
            model.stages_of_profile_completion.clone(),
        )?;
        let mut kyc_stages: Stages = from_json_column(
            "stages_of_kyc_verification",
            model.stages_of_kyc_verification.clone(),
        )?;
        profile_stages.set(stage, approved);
        kyc_stages.set(stage, approved);

        let mut active_model: entity::user::ActiveModel = model.into();
        active_model.stages_of_profile_completion = ActiveValue::Set(profile_stages.to_json());
        active_model.stages_of_kyc_verification = ActiveValue::Set(kyc_stages.to_json());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        User::from_entity(active_model.update(self.db).await?)
    }

    pub async fn mark_verified(&self, user_id: i32) -> Result<(), DbErr> {
        let mut active_model: entity::user::ActiveModel = self.find_model(user_id).await?.into();
        active_model.is_verified = ActiveValue::Set(true);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await?;

        Ok(())
    }

    pub async fn update_last_login(&self, user_id: i32) -> Result<(), DbErr> {
        let now = Utc::now();
        let mut active_model: entity::user::ActiveModel = self.find_model(user_id).await?.into();
        active_model.last_login = ActiveValue::Set(Some(now));
        active_model.updated_at = ActiveValue::Set(now);
        active_model.update(self.db).await?;

        Ok(())
    }

    pub async fn set_password_hash(&self, user_id: i32, password_hash: String) -> Result<(), DbErr> {
        let mut active_model: entity::user::ActiveModel = self.find_model(user_id).await?.into();
        active_model.password_hash = ActiveValue::Set(password_hash);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await?;

        Ok(())
    }

    async fn find_model(&self, user_id: i32) -> Result<entity::user::Model, DbErr> {
        entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "User with id {} not found",
                user_id
            )))
    }
}
