use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000001_create_media_albums_table::MediaAlbum,
    m20260101_000003_create_users_table::User,
    m20260102_000007_create_companies_table::Company,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Property::Table)
                    .if_not_exists()
                    .col(pk_uuid(Property::Id))
                    .col(string_len(Property::Name, 256))
                    .col(integer(Property::AgentId))
                    .col(integer(Property::CompanyId))
                    .col(string_len(Property::CompanyName, 256))
                    .col(text(Property::Description).default(""))
                    .col(string(Property::ModerationStatus).default("PENDING"))
                    .col(boolean(Property::Archived).default(false))
                    .col(string(Property::CompletionStatus).default("IN-PROGRESS"))
                    .col(string(Property::Stage).default("LISTING"))
                    .col(integer(Property::PercentageSold).default(0))
                    .col(string(Property::ApartmentType))
                    .col(string(Property::Address))
                    .col(string_len_null(Property::City, 50))
                    .col(string_len(Property::State, 50))
                    .col(string_len(Property::Country, 50))
                    .col(integer_null(Property::ZipCode))
                    .col(integer_null(Property::PercentageDiscount))
                    .col(date_null(Property::PromotionClosingDate))
                    .col(string(Property::PromotionType).default(""))
                    .col(text(Property::OtherDeals).default(""))
                    .col(text(Property::OtherIncentives).default(""))
                    .col(integer_null(Property::ImageAlbumId))
                    .col(integer_null(Property::DocumentAlbumId))
                    .col(string_null(Property::DefaultImage))
                    .col(integer_null(Property::NumberOfBedrooms))
                    .col(integer_null(Property::NumberOfToilets))
                    .col(json(Property::Benefits))
                    .col(json(Property::Amenities))
                    .col(string_len(Property::ErfSize, 256).default(""))
                    .col(string_len(Property::DiningArea, 256).default(""))
                    .col(json(Property::CrossStreets))
                    .col(json(Property::Landmarks))
                    .col(string(Property::FloorSize).default(""))
                    .col(date_null(Property::DateBuilt))
                    .col(big_integer_null(Property::PricePerShare))
                    .col(big_integer_null(Property::CompletionCost))
                    .col(date_null(Property::CompletionDate))
                    .col(integer_null(Property::PercentageCompleted))
                    .col(integer_null(Property::TotalNumberOfShares))
                    .col(big_integer_null(Property::TotalPropertyCost))
                    .col(big_integer_null(Property::ExpectedRoi))
                    .col(string(Property::AreaRentRolls).default(""))
                    .col(json(Property::ScheduledStays))
                    .col(
                        timestamp_with_time_zone(Property::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Property::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_agent_id")
                            .from(Property::Table, Property::AgentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_company_id")
                            .from(Property::Table, Property::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_image_album_id")
                            .from(Property::Table, Property::ImageAlbumId)
                            .to(MediaAlbum::Table, MediaAlbum::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_document_album_id")
                            .from(Property::Table, Property::DocumentAlbumId)
                            .to(MediaAlbum::Table, MediaAlbum::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_moderation_status")
                    .table(Property::Table)
                    .col(Property::ModerationStatus)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Property::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Property {
    #[sea_orm(iden = "properties")]
    Table,
    Id,
    Name,
    AgentId,
    CompanyId,
    CompanyName,
    Description,
    ModerationStatus,
    Archived,
    CompletionStatus,
    Stage,
    PercentageSold,
    ApartmentType,
    Address,
    City,
    State,
    Country,
    ZipCode,
    PercentageDiscount,
    PromotionClosingDate,
    PromotionType,
    OtherDeals,
    OtherIncentives,
    ImageAlbumId,
    DocumentAlbumId,
    DefaultImage,
    NumberOfBedrooms,
    NumberOfToilets,
    Benefits,
    Amenities,
    ErfSize,
    DiningArea,
    CrossStreets,
    Landmarks,
    FloorSize,
    DateBuilt,
    PricePerShare,
    CompletionCost,
    CompletionDate,
    PercentageCompleted,
    TotalNumberOfShares,
    TotalPropertyCost,
    ExpectedRoi,
    AreaRentRolls,
    ScheduledStays,
    CreatedAt,
    UpdatedAt,
}
