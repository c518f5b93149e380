use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    config::TokenSettings,
    data::{
        auth::{AuthTokenRepository, EmailVerificationRepository, PasswordResetRepository},
        user::UserRepository,
    },
    error::{
        auth::AuthError, internal::InternalError, validation::ValidationError, AppError,
    },
    model::{
        auth::{
            IssueTokenParam, LoginResult, SignupParam, TokenKind, TokenPair, BEARER_TOKEN_LENGTH,
            RESET_TOKEN_LENGTH, VERIFICATION_TOKEN_LENGTH,
        },
        user::{CreateUserParam, Role, User},
        Choice,
    },
    service::email::{EmailMessage, Mailer},
    util::{parse, random},
};

/// How long an email verification code is accepted.
const VERIFICATION_TTL_MINUTES: i64 = 6;
/// How long a password reset link is accepted.
const PASSWORD_RESET_TTL_HOURS: i64 = 1;

/// Service for email/password accounts and bearer tokens.
///
/// Covers signup with email verification, login, token refresh and revocation, and
/// the password reset flow. Emails are queued on the mailer and never block a request.
pub struct AuthService<'a> {
    /// Database connection for account and token operations.
    pub db: &'a DatabaseConnection,
    /// Background email dispatcher for verification codes and reset links.
    pub mailer: &'a Mailer,
    /// Lifetimes of issued access and refresh tokens.
    pub tokens: TokenSettings,
    /// Public base URL used to build password reset links.
    pub app_url: &'a str,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `mailer` - Reference to the email dispatcher
    /// - `tokens` - Token lifetimes from configuration
    /// - `app_url` - Public base URL of the API
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        mailer: &'a Mailer,
        tokens: TokenSettings,
        app_url: &'a str,
    ) -> Self {
        Self {
            db,
            mailer,
            tokens,
            app_url,
        }
    }

    /// Registers a new, unverified account and emails its verification code.
    ///
    /// The user and their verification row are written in one transaction.
    ///
    /// # Arguments
    /// - `param` - Names, email, password and optional role as entered
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(AppError::ValidationErr)` - A field broke its rules
    /// - `Err(AppError::Conflict)` - The email is already registered
    pub async fn signup(&self, param: SignupParam) -> Result<User, AppError> {
        parse::validate_alphabetic(
            "firstname",
            param.firstname.trim(),
            "Firstname must contain alphabets only",
        )?;
        parse::validate_alphabetic(
            "lastname",
            param.lastname.trim(),
            "Lastname must contain alphabets only",
        )?;
        let email = parse::normalize_email(&param.email);
        parse::validate_email("email", &email)?;
        parse::validate_password(&param.password)?;
        let role = match param.role.as_deref().map(str::trim) {
            None | Some("") => Role::Customer,
            Some(value) => Role::parse(value).ok_or_else(|| {
                ValidationError::new("role", format!("\"{}\" is not a valid choice.", value))
            })?,
        };

        if UserRepository::new(self.db).email_exists(&email).await? {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password(&param.password)?;
        let token = random::numeric(VERIFICATION_TOKEN_LENGTH);

        let txn = self.db.begin().await?;
        let user = UserRepository::new(&txn)
            .create(CreateUserParam {
                email,
                password_hash,
                firstname: param.firstname.trim().to_string(),
                lastname: param.lastname.trim().to_string(),
                role,
            })
            .await?;
        EmailVerificationRepository::new(&txn)
            .upsert(user.id, token.clone(), verification_expiry())
            .await?;
        txn.commit().await?;

        tracing::info!("User {} signed up as {}", user.id, user.role.as_str());
        self.send_verification_email(&user, &token);

        Ok(user)
    }

    /// Confirms an email address with its 6 digit code.
    ///
    /// # Returns
    /// - `Ok(())` - The user is now verified
    /// - `Err(AppError::ValidationErr)` - The code is not 6 characters long
    /// - `Err(AppError::BadRequest)` - Unknown user, wrong code, or a used or expired code
    pub async fn verify_email(&self, email: &str, token: &str) -> Result<(), AppError> {
        if token.chars().count() != VERIFICATION_TOKEN_LENGTH {
            return Err(ValidationError::new(
                "token",
                "Ensure this field has exactly 6 characters.",
            )
            .into());
        }

        let email = parse::normalize_email(email);
        let user_not_found = || AppError::BadRequest("User not found".to_string());
        let user = UserRepository::new(self.db)
            .find_by_email(&email)
            .await?
            .ok_or_else(user_not_found)?;
        let verification = EmailVerificationRepository::new(self.db)
            .find_by_user(user.id)
            .await?
            .ok_or_else(user_not_found)?;

        if verification.token != token {
            return Err(AppError::BadRequest("Wrong Token".to_string()));
        }
        let now = Utc::now();
        if verification.is_verified || verification.token_expiry < now {
            return Err(AppError::BadRequest("Token Expired".to_string()));
        }

        let txn = self.db.begin().await?;
        EmailVerificationRepository::new(&txn)
            .mark_verified(user.id, now)
            .await?;
        UserRepository::new(&txn).mark_verified(user.id).await?;
        txn.commit().await?;

        Ok(())
    }

    /// Issues a fresh verification code and emails it again.
    ///
    /// # Returns
    /// - `Ok(())` - A new code was sent
    /// - `Err(AppError::BadRequest)` - Unknown user or the email is already verified
    pub async fn resend_verification(&self, email: &str) -> Result<(), AppError> {
        let email = parse::normalize_email(email);
        let user = UserRepository::new(self.db)
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::BadRequest("User not found".to_string()))?;

        if user.is_verified {
            return Err(AppError::BadRequest("Email already verified".to_string()));
        }

        let token = random::numeric(VERIFICATION_TOKEN_LENGTH);
        EmailVerificationRepository::new(self.db)
            .upsert(user.id, token.clone(), verification_expiry())
            .await?;
        self.send_verification_email(&user, &token);

        Ok(())
    }

    /// Checks credentials and hands out an access and a refresh token.
    ///
    /// # Returns
    /// - `Ok(LoginResult)` - The user and their new tokens
    /// - `Err(AppError::AuthErr)` - Bad credentials, disabled account or unverified email
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = parse::normalize_email(email);
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_active {
            return Err(AuthError::AccountDisabled.into());
        }
        if !user.is_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let txn = self.db.begin().await?;
        UserRepository::new(&txn).update_last_login(user.id).await?;
        let token_repo = AuthTokenRepository::new(&txn);
        let access = self
            .issue_token(&token_repo, user.id, TokenKind::Access)
            .await?;
        let refresh = self
            .issue_token(&token_repo, user.id, TokenKind::Refresh)
            .await?;
        txn.commit().await?;

        Ok(LoginResult {
            user,
            tokens: TokenPair { access, refresh },
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// # Returns
    /// - `Ok(String)` - The new access token
    /// - `Err(AppError::AuthErr(InvalidToken))` - Unknown or expired refresh token, or inactive owner
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let token_repo = AuthTokenRepository::new(self.db);

        let token = token_repo
            .find(refresh_token, TokenKind::Refresh)
            .await?
            .filter(|token| !token.is_expired(Utc::now()))
            .ok_or(AuthError::InvalidToken)?;

        let owner_active = UserRepository::new(self.db)
            .find_by_id(token.user_id)
            .await?
            .is_some_and(|user| user.is_active);
        if !owner_active {
            return Err(AuthError::InvalidToken.into());
        }

        self.issue_token(&token_repo, token.user_id, TokenKind::Access)
            .await
    }

    /// Revokes the presented access token.
    pub async fn logout(&self, access_token: &str) -> Result<(), AppError> {
        AuthTokenRepository::new(self.db).delete(access_token).await?;
        Ok(())
    }

    /// Emails a password reset link when the address belongs to an account.
    ///
    /// Unknown addresses succeed silently so accounts cannot be enumerated.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let email = parse::normalize_email(email);
        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = random::alphanumeric(RESET_TOKEN_LENGTH);
        PasswordResetRepository::new(self.db)
            .create(
                user.id,
                token.clone(),
                Utc::now() + Duration::hours(PASSWORD_RESET_TTL_HOURS),
            )
            .await?;

        let link = format!(
            "{}/api/auth/password-reset/{}/{}/",
            self.app_url, user.id, token
        );
        self.mailer.send(EmailMessage::new(
            user.email,
            "Reset your password",
            format!(
                "Hello {},\nUse the link below to reset your password.\n\n{}",
                user.firstname, link
            ),
        ));

        Ok(())
    }

    /// Checks that a reset token can still be used.
    ///
    /// # Returns
    /// - `Ok(())` - Token is unused and unexpired
    /// - `Err(AppError::AuthErr(InvalidResetToken))` - Token is unknown, used or expired
    pub async fn check_password_reset(&self, user_id: i32, token: &str) -> Result<(), AppError> {
        let reset = PasswordResetRepository::new(self.db)
            .find(user_id, token)
            .await?
            .filter(|reset| reset.is_usable(Utc::now()));

        match reset {
            Some(_) => Ok(()),
            None => Err(AuthError::InvalidResetToken.into()),
        }
    }

    /// Replaces the password using a reset token.
    ///
    /// The token is consumed and every bearer token of the user is revoked, in one
    /// transaction.
    ///
    /// # Returns
    /// - `Ok(())` - Password replaced
    /// - `Err(AppError::ValidationErr)` - The new password is too weak
    /// - `Err(AppError::AuthErr(InvalidResetToken))` - Token is unknown, used or expired
    pub async fn set_new_password(
        &self,
        user_id: i32,
        token: &str,
        password: &str,
    ) -> Result<(), AppError> {
        parse::validate_password(password)?;

        let reset = PasswordResetRepository::new(self.db)
            .find(user_id, token)
            .await?
            .filter(|reset| reset.is_usable(Utc::now()))
            .ok_or(AuthError::InvalidResetToken)?;

        let password_hash = hash_password(password)?;

        let txn = self.db.begin().await?;
        UserRepository::new(&txn)
            .set_password_hash(user_id, password_hash)
            .await?;
        PasswordResetRepository::new(&txn).mark_used(reset.id).await?;
        let revoked = AuthTokenRepository::new(&txn)
            .delete_for_user(user_id)
            .await?;
        txn.commit().await?;

        tracing::info!(
            "User {} reset their password, {} tokens revoked",
            user_id,
            revoked
        );

        Ok(())
    }

    async fn issue_token<C: sea_orm::ConnectionTrait>(
        &self,
        repo: &AuthTokenRepository<'_, C>,
        user_id: i32,
        kind: TokenKind,
    ) -> Result<String, AppError> {
        let ttl = match kind {
            TokenKind::Access => self.tokens.access_ttl,
            TokenKind::Refresh => self.tokens.refresh_ttl,
        };

        let token = repo
            .create(IssueTokenParam {
                user_id,
                kind,
                token: random::alphanumeric(BEARER_TOKEN_LENGTH),
                expires_at: Utc::now() + ttl,
            })
            .await?;

        Ok(token.token)
    }

    fn send_verification_email(&self, user: &User, token: &str) {
        self.mailer.send(EmailMessage::new(
            user.email.clone(),
            "Verify Your Email",
            format!(
                "Hello {},\nYour securely generated token is available below.\n\n{}",
                user.firstname, token
            ),
        ));
    }
}

fn verification_expiry() -> chrono::DateTime<Utc> {
    Utc::now() + Duration::minutes(VERIFICATION_TTL_MINUTES)
}

/// Hashes a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| InternalError::PasswordHash(e.to_string()).into())
}

/// Checks a password against a stored hash. Unparseable hashes never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
