pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_media_albums_table;
mod m20260101_000002_create_media_files_table;
mod m20260101_000003_create_users_table;
mod m20260101_000004_create_auth_tokens_table;
mod m20260101_000005_create_email_verifications_table;
mod m20260101_000006_create_password_resets_table;
mod m20260102_000007_create_companies_table;
mod m20260102_000008_create_company_verifications_table;
mod m20260102_000009_create_reviews_table;
mod m20260103_000010_create_properties_table;
mod m20260103_000011_create_shopping_cart_table;
mod m20260103_000012_create_property_ownerships_table;
mod m20260104_000013_create_property_inspections_table;
mod m20260104_000014_create_transaction_logs_table;
mod m20260105_000015_create_notifications_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_media_albums_table::Migration),
            Box::new(m20260101_000002_create_media_files_table::Migration),
            Box::new(m20260101_000003_create_users_table::Migration),
            Box::new(m20260101_000004_create_auth_tokens_table::Migration),
            Box::new(m20260101_000005_create_email_verifications_table::Migration),
            Box::new(m20260101_000006_create_password_resets_table::Migration),
            Box::new(m20260102_000007_create_companies_table::Migration),
            Box::new(m20260102_000008_create_company_verifications_table::Migration),
            Box::new(m20260102_000009_create_reviews_table::Migration),
            Box::new(m20260103_000010_create_properties_table::Migration),
            Box::new(m20260103_000011_create_shopping_cart_table::Migration),
            Box::new(m20260103_000012_create_property_ownerships_table::Migration),
            Box::new(m20260104_000013_create_property_inspections_table::Migration),
            Box::new(m20260104_000014_create_transaction_logs_table::Migration),
            Box::new(m20260105_000015_create_notifications_table::Migration),
        ]
    }
}
