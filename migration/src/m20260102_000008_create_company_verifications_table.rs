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
                    .table(CompanyVerification::Table)
                    .if_not_exists()
                    .col(pk_auto(CompanyVerification::Id))
                    .col(integer_uniq(CompanyVerification::UserId))
                    .col(boolean(CompanyVerification::IsVerified).default(false))
                    .col(string_len_uniq(CompanyVerification::RegistrationNumber, 65))
                    .col(string_len_uniq(CompanyVerification::ReferenceNumber, 12))
                    .col(string_len_uniq(CompanyVerification::RegisteredCompanyName, 500))
                    .col(
                        timestamp_with_time_zone(CompanyVerification::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(CompanyVerification::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_verifications_user_id")
                            .from(CompanyVerification::Table, CompanyVerification::UserId)
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
            .drop_table(Table::drop().table(CompanyVerification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CompanyVerification {
    #[sea_orm(iden = "company_verifications")]
    Table,
    Id,
    UserId,
    IsVerified,
    RegistrationNumber,
    ReferenceNumber,
    RegisteredCompanyName,
    CreatedAt,
    UpdatedAt,
}
