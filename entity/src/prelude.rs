pub use super::auth_token::Entity as AuthToken;
pub use super::company::Entity as Company;
pub use super::company_verification::Entity as CompanyVerification;
pub use super::email_verification::Entity as EmailVerification;
pub use super::media_album::Entity as MediaAlbum;
pub use super::media_file::Entity as MediaFile;
pub use super::notification::Entity as Notification;
pub use super::password_reset::Entity as PasswordReset;
pub use super::property::Entity as Property;
pub use super::property_inspection::Entity as PropertyInspection;
pub use super::property_ownership::Entity as PropertyOwnership;
pub use super::review::Entity as Review;
pub use super::shopping_cart::Entity as ShoppingCart;
pub use super::transaction_log::Entity as TransactionLog;
pub use super::user::Entity as User;
