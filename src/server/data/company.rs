//! Company and company verification repositories.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::server::{
    error::{internal::InternalError, AppError},
    model::company::{
        BankInformation, Company, CreateCompanyParam, CreateCompanyVerificationParam,
    },
};

pub struct CompanyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompanyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a company with an empty bank information list.
    ///
    /// # Returns
    /// - `Ok(Company)` - The created company
    /// - `Err(AppError::DbErr)` - Insert failed, e.g. a unique column clashed
    pub async fn create(&self, param: CreateCompanyParam) -> Result<Company, AppError> {
        let now = Utc::now();
        let entity = entity::company::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            email: ActiveValue::Set(param.email),
            phone: ActiveValue::Set(param.phone),
            display_name: ActiveValue::Set(param.display_name),
            website: ActiveValue::Set(param.website),
            city: ActiveValue::Set(param.city),
            country: ActiveValue::Set(param.country),
            description: ActiveValue::Set(param.description),
            reference_number: ActiveValue::Set(param.reference_number),
            company_logo: ActiveValue::Set(param.company_logo),
            certificate_of_incorporation: ActiveValue::Set(param.certificate_of_incorporation),
            bank_information: ActiveValue::Set(serde_json::json!([])),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Company::from_entity(entity)
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<Company>, AppError> {
        entity::prelude::Company::find()
            .filter(entity::company::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .map(Company::from_entity)
            .transpose()
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Company::find()
            .filter(entity::company::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn phone_taken(&self, phone: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Company::find()
            .filter(entity::company::Column::Phone.eq(phone))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Replaces the stored bank information list.
    ///
    /// # Arguments
    /// - `company_id` - Company to update
    /// - `bank_information` - The complete new list
    ///
    /// # Returns
    /// - `Ok(Company)` - The updated company
    /// - `Err(AppError)` - Company missing or update failed
    pub async fn set_bank_information(
        &self,
        company_id: i32,
        bank_information: &[BankInformation],
    ) -> Result<Company, AppError> {
        let model = entity::prelude::Company::find_by_id(company_id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Company with id {} not found",
                company_id
            )))?;

        let value = serde_json::to_value(bank_information).map_err(|source| {
            InternalError::MalformedJsonColumn {
                column: "bank_information",
                source,
            }
        })?;

        let mut active_model: entity::company::ActiveModel = model.into();
        active_model.bank_information = ActiveValue::Set(value);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Company::from_entity(active_model.update(self.db).await?)
    }
}

/// Repository for registry checks performed during company creation.
pub struct CompanyVerificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompanyVerificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateCompanyVerificationParam) -> Result<(), DbErr> {
        let now = Utc::now();
        entity::company_verification::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            is_verified: ActiveValue::Set(param.is_verified),
            registration_number: ActiveValue::Set(param.registration_number),
            reference_number: ActiveValue::Set(param.reference_number),
            registered_company_name: ActiveValue::Set(param.registered_company_name),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Whether the user's company passed the registry check. False when none ran.
    pub async fn is_verified(&self, user_id: i32) -> Result<bool, DbErr> {
        let entity = entity::prelude::CompanyVerification::find()
            .filter(entity::company_verification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.is_some_and(|verification| verification.is_verified))
    }

    /// Checks the unique columns of a verification row before inserting it.
    pub async fn exists(
        &self,
        registration_number: &str,
        reference_number: &str,
        registered_company_name: &str,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::CompanyVerification::find()
            .filter(
                sea_orm::Condition::any()
                    .add(
                        entity::company_verification::Column::RegistrationNumber
                            .eq(registration_number),
                    )
                    .add(entity::company_verification::Column::ReferenceNumber.eq(reference_number))
                    .add(
                        entity::company_verification::Column::RegisteredCompanyName
                            .eq(registered_company_name),
                    ),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
