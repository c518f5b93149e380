use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        company::{CompanyRepository, CompanyVerificationRepository},
        property::PropertyRepository,
        review::ReviewRepository,
        user::UserRepository,
    },
    error::{validation::ValidationError, AppError},
    model::{
        company::{
            BankInformation, BusinessProfile, Company, CreateCompanyParam,
            CreateCompanyVerificationParam,
        },
        media::MediaType,
        review::average_rating,
        user::{OnboardingStage, User},
    },
    service::{
        identity,
        storage::{MediaFolder, MediaStorage},
    },
    util::{multipart::MultipartForm, parse, random},
};

const BANK_INFORMATION_KEYS: [&str; 4] = ["account_name", "account_number", "bank_name", "country"];

/// Length of the generated reference number of a registry check.
const VERIFICATION_REFERENCE_LENGTH: usize = 12;

/// Registry details submitted alongside a new company.
struct Registration {
    registration_number: String,
    registered_company_name: String,
}

pub struct CompanyService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a MediaStorage,
}

impl<'a> CompanyService<'a> {
    /// Creates a new CompanyService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `storage` - Media storage for logos and certificates
    ///
    /// # Returns
    /// - `CompanyService` - New service instance
    pub fn new(db: &'a DatabaseConnection, storage: &'a MediaStorage) -> Self {
        Self { db, storage }
    }

    /// Registers the business of an agent from a multipart form.
    ///
    /// When a registration number is supplied the registry is consulted and the
    /// outcome is stored as the company's verification row.
    ///
    /// # Arguments
    /// - `user` - The agent registering a business
    /// - `form` - Buffered multipart form
    ///
    /// # Returns
    /// - `Ok((Company, bool))` - The new company and whether the registry check passed
    /// - `Err(AppError::ValidationErr)` - A field or file broke its rules
    /// - `Err(AppError::Conflict)` - Phone, email or the user's company already exists
    pub async fn create_company(
        &self,
        user: &User,
        form: &MultipartForm,
    ) -> Result<(Company, bool), AppError> {
        let mut param = validate_company_form(user.id, form)?;
        let registration = validate_registration(form)?;

        let company_repo = CompanyRepository::new(self.db);
        if company_repo.phone_taken(&param.phone).await? {
            return Err(AppError::Conflict("phone already taken".to_string()));
        }
        if company_repo.email_taken(&param.email).await? {
            return Err(AppError::Conflict("email already taken".to_string()));
        }
        if company_repo.find_by_user(user.id).await?.is_some() {
            return Err(AppError::Conflict(
                "company already exists for this user".to_string(),
            ));
        }

        let verification = match registration {
            Some(registration) => {
                let reference_number = random::alphanumeric(VERIFICATION_REFERENCE_LENGTH);
                if CompanyVerificationRepository::new(self.db)
                    .exists(
                        &registration.registration_number,
                        &reference_number,
                        &registration.registered_company_name,
                    )
                    .await?
                {
                    return Err(AppError::Conflict(
                        "company registration already exists".to_string(),
                    ));
                }

                let registered_name =
                    identity::verify_registration_number(&registration.registration_number);
                let is_verified = identity::is_similar_company_name(
                    &registered_name,
                    &registration.registered_company_name,
                );

                Some(CreateCompanyVerificationParam {
                    user_id: user.id,
                    registration_number: registration.registration_number,
                    reference_number,
                    registered_company_name: registration.registered_company_name,
                    is_verified,
                })
            }
            None => None,
        };

        let mut written: Vec<String> = Vec::new();
        if let Some(logo) = form.file("company_logo") {
            let stored = self
                .storage
                .store(MediaFolder::Companies, MediaType::Image, logo)
                .await?;
            written.push(stored.path.clone());
            param.company_logo = Some(stored.path);
        }
        if let Some(certificate) = form.file("certificate_of_incorporation") {
            let stored = match self
                .storage
                .store(MediaFolder::Companies, MediaType::Document, certificate)
                .await
            {
                Ok(stored) => stored,
                Err(e) => {
                    self.storage.discard(&written).await;
                    return Err(e);
                }
            };
            written.push(stored.path.clone());
            param.certificate_of_incorporation = Some(stored.path);
        }

        match self.insert_company(user.id, param, verification).await {
            Ok(created) => Ok(created),
            Err(e) => {
                self.storage.discard(&written).await;
                Err(e)
            }
        }
    }

    /// Appends one validated bank account to the caller's company.
    ///
    /// # Arguments
    /// - `user` - The agent owning the company
    /// - `raw` - The submitted map, checked against the expected key set
    ///
    /// # Returns
    /// - `Ok(Vec<BankInformation>)` - The company's full bank information list
    /// - `Err(AppError::ValidationErr)` - Keys or values are invalid
    /// - `Err(AppError::NotFound)` - The user has no company
    pub async fn add_bank_information(
        &self,
        user: &User,
        raw: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Vec<BankInformation>, AppError> {
        let entry = parse_bank_information(raw)?;

        let company = CompanyRepository::new(self.db)
            .find_by_user(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("company not found".to_string()))?;

        let mut bank_information = company.bank_information;
        bank_information.push(entry);

        let txn = self.db.begin().await?;
        let company = CompanyRepository::new(&txn)
            .set_bank_information(company.id, &bank_information)
            .await?;
        UserRepository::new(&txn)
            .set_profile_stage(user.id, OnboardingStage::Billing, true)
            .await?;
        txn.commit().await?;

        Ok(company.bank_information)
    }

    /// Gets the public business page of a user.
    ///
    /// # Returns
    /// - `Ok(BusinessProfile)` - Account, company, listings, reviews and rating
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn business_profile(&self, user_id: i32) -> Result<BusinessProfile, AppError> {
        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let company = CompanyRepository::new(self.db).find_by_user(user_id).await?;
        let company_verified = CompanyVerificationRepository::new(self.db)
            .is_verified(user_id)
            .await?;
        let properties = PropertyRepository::new(self.db).get_by_agent(user_id).await?;
        let reviews = ReviewRepository::new(self.db).get_for_agent(user_id).await?;
        let rating = average_rating(&reviews);

        let mut reviewer_ids: Vec<i32> = reviews.iter().map(|review| review.reviewer_id).collect();
        reviewer_ids.sort_unstable();
        reviewer_ids.dedup();
        let reviewers = user_repo.find_by_ids(reviewer_ids).await?;

        let reviews = reviews
            .into_iter()
            .filter_map(|review| {
                reviewers
                    .iter()
                    .find(|reviewer| reviewer.id == review.reviewer_id)
                    .cloned()
                    .map(|reviewer| (review, reviewer))
            })
            .collect();

        Ok(BusinessProfile {
            user,
            company,
            company_verified,
            properties,
            reviews,
            rating,
        })
    }

    async fn insert_company(
        &self,
        user_id: i32,
        param: CreateCompanyParam,
        verification: Option<CreateCompanyVerificationParam>,
    ) -> Result<(Company, bool), AppError> {
        let is_verified = verification
            .as_ref()
            .is_some_and(|verification| verification.is_verified);

        let txn = self.db.begin().await?;
        let company = CompanyRepository::new(&txn).create(param).await?;
        if let Some(verification) = verification {
            CompanyVerificationRepository::new(&txn)
                .create(verification)
                .await?;
        }
        UserRepository::new(&txn)
            .set_profile_stage(user_id, OnboardingStage::Business, true)
            .await?;
        txn.commit().await?;

        tracing::info!(
            "User {} registered company {} (verified: {})",
            user_id,
            company.id,
            is_verified
        );

        Ok((company, is_verified))
    }
}

fn validate_company_form(user_id: i32, form: &MultipartForm) -> Result<CreateCompanyParam, ValidationError> {
    let email = parse::normalize_email(form.required_text("email")?);
    parse::validate_email("email", &email)?;

    let reference_number = form.required_text("reference_number")?;
    parse::validate_length("reference_number", reference_number, 4, 255)?;

    let phone = form.required_text("phone")?;
    parse::validate_length("phone", phone, 4, 255)?;
    parse::validate_digits("phone", phone, "phone must contain only digits")?;

    let display_name = form.required_text("display_name")?;
    parse::validate_length("display_name", display_name, 2, 65)?;

    let website = form.text("website");
    if let Some(website) = website {
        parse::validate_length("website", website, 2, 255)?;
    }

    let city = form.required_text("city")?;
    parse::validate_length("city", city, 2, 255)?;

    let country = form.required_text("country")?;
    parse::validate_length("country", country, 2, 65)?;

    if let Some(logo) = form.file("company_logo") {
        logo.validate_image("company_logo")?;
    }
    if let Some(certificate) = form.file("certificate_of_incorporation") {
        certificate.validate_document("certificate_of_incorporation")?;
    }

    Ok(CreateCompanyParam {
        user_id,
        email,
        phone: phone.to_string(),
        display_name: display_name.to_string(),
        website: website.map(str::to_string),
        city: city.to_string(),
        country: country.to_string(),
        description: form.text("description").map(str::to_string),
        reference_number: reference_number.to_string(),
        company_logo: None,
        certificate_of_incorporation: None,
    })
}

/// Registration details are optional, but a number needs a name to compare against.
fn validate_registration(form: &MultipartForm) -> Result<Option<Registration>, ValidationError> {
    let Some(registration_number) = form.text("registration_number") else {
        return Ok(None);
    };
    parse::validate_length("registration_number", registration_number, 4, 255)?;

    let registered_company_name = form.required_text("registered_company_name")?;

    Ok(Some(Registration {
        registration_number: registration_number.to_string(),
        registered_company_name: registered_company_name.to_string(),
    }))
}

fn parse_bank_information(
    raw: &serde_json::Map<String, serde_json::Value>,
) -> Result<BankInformation, ValidationError> {
    let has_expected_keys = raw.len() == BANK_INFORMATION_KEYS.len()
        && BANK_INFORMATION_KEYS.iter().all(|key| raw.contains_key(*key));
    if !has_expected_keys {
        return Err(ValidationError::new(
            "bank_information",
            "Bank Information should be a map of 'account_name', 'account_number', 'bank_name', 'country' ",
        ));
    }

    let value = |key: &str| -> Result<String, ValidationError> {
        let value = raw
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if value.chars().count() < 3 {
            return Err(ValidationError::new(
                "bank_information",
                format!("{} must have at least 3 characters", key),
            ));
        }
        Ok(value.to_string())
    };

    let account_number = value("account_number")?;
    parse::validate_digits(
        "bank_information",
        &account_number,
        "Account number must be a string of numbers",
    )?;

    Ok(BankInformation {
        account_name: value("account_name")?,
        account_number,
        bank_name: value("bank_name")?,
        country: value("country")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_map(entries: &[(&str, &str)]) -> serde_json::Map<String, serde_json::Value> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), serde_json::Value::from(*value)))
            .collect()
    }

    #[test]
    fn rejects_unexpected_bank_keys() {
        let raw = bank_map(&[
            ("account_name", "Jane Doe"),
            ("account_number", "0123456789"),
            ("bank_name", "First Bank"),
            ("swift", "FBNINGLA"),
        ]);

        let err = parse_bank_information(&raw).unwrap_err();
        assert_eq!(err.field, "bank_information");
        assert!(err.message.starts_with("Bank Information should be a map"));
    }

    #[test]
    fn rejects_non_numeric_account_numbers() {
        let raw = bank_map(&[
            ("account_name", "Jane Doe"),
            ("account_number", "01234-567"),
            ("bank_name", "First Bank"),
            ("country", "Nigeria"),
        ]);

        let err = parse_bank_information(&raw).unwrap_err();
        assert_eq!(err.message, "Account number must be a string of numbers");
    }

    #[test]
    fn rejects_short_bank_values() {
        let raw = bank_map(&[
            ("account_name", "Jane Doe"),
            ("account_number", "0123456789"),
            ("bank_name", "FB"),
            ("country", "Nigeria"),
        ]);

        assert!(parse_bank_information(&raw).is_err());
    }
}
