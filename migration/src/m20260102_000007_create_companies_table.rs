use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000003_create_users_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(integer_uniq(Company::UserId))
                    .col(string_uniq(Company::Email))
                    .col(string_uniq(Company::Phone))
                    .col(string_len(Company::DisplayName, 65))
                    .col(string_null(Company::Website))
                    .col(string(Company::City))
                    .col(string_len(Company::Country, 65))
                    .col(text_null(Company::Description))
                    .col(string(Company::ReferenceNumber))
                    .col(string_null(Company::CompanyLogo))
                    .col(string_null(Company::CertificateOfIncorporation))
                    .col(json(Company::BankInformation))
                    .col(
                        timestamp_with_time_zone(Company::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Company::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_user_id")
                            .from(Company::Table, Company::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Company::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Company {
    #[sea_orm(iden = "companies")]
    Table,
    Id,
    UserId,
    Email,
    Phone,
    DisplayName,
    Website,
    City,
    Country,
    Description,
    ReferenceNumber,
    CompanyLogo,
    CertificateOfIncorporation,
    BankInformation,
    CreatedAt,
    UpdatedAt,
}
