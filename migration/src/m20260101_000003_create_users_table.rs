use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_media_albums_table::MediaAlbum;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_uniq(User::Email))
                    .col(string(User::PasswordHash))
                    .col(string(User::Firstname))
                    .col(string(User::Lastname))
                    .col(string_null(User::Phone).unique_key())
                    .col(string_null(User::SecondaryPhone))
                    .col(boolean(User::IsVerified).default(false))
                    .col(boolean(User::IsActive).default(true))
                    .col(boolean(User::IsStaff).default(false))
                    .col(string(User::AuthProvider).default("email"))
                    .col(string(User::Role).default("CUSTOMER"))
                    .col(string_null(User::Nationality))
                    .col(string_null(User::Agency))
                    .col(string_null(User::Title))
                    .col(text(User::Summary).default(""))
                    .col(date_null(User::DateOfBirth))
                    .col(text_null(User::Address))
                    .col(string_null(User::City))
                    .col(string_null(User::Country))
                    .col(string_null(User::IdentityDocumentType))
                    .col(string_null(User::IdentityDocumentNumber))
                    .col(date_null(User::IdentityDocumentExpiryDate))
                    .col(integer_null(User::IdentityDocumentAlbumId))
                    .col(string_null(User::DisplayPhoto))
                    .col(string_null(User::ProofOfAddressDocument))
                    .col(json(User::StagesOfProfileCompletion))
                    .col(json(User::StagesOfKycVerification))
                    .col(timestamp_with_time_zone_null(User::LastLogin))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_identity_document_album_id")
                            .from(User::Table, User::IdentityDocumentAlbumId)
                            .to(MediaAlbum::Table, MediaAlbum::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    PasswordHash,
    Firstname,
    Lastname,
    Phone,
    SecondaryPhone,
    IsVerified,
    IsActive,
    IsStaff,
    AuthProvider,
    Role,
    Nationality,
    Agency,
    Title,
    Summary,
    DateOfBirth,
    Address,
    City,
    Country,
    IdentityDocumentType,
    IdentityDocumentNumber,
    IdentityDocumentExpiryDate,
    IdentityDocumentAlbumId,
    DisplayPhoto,
    ProofOfAddressDocument,
    StagesOfProfileCompletion,
    StagesOfKycVerification,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
