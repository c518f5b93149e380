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
                    .table(EmailVerification::Table)
                    .if_not_exists()
                    .col(pk_auto(EmailVerification::Id))
                    .col(integer_uniq(EmailVerification::UserId))
                    .col(boolean(EmailVerification::IsVerified).default(false))
                    .col(string_len(EmailVerification::Token, 6))
                    .col(timestamp_with_time_zone(EmailVerification::TokenExpiry))
                    .col(
                        timestamp_with_time_zone(EmailVerification::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(EmailVerification::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_verifications_user_id")
                            .from(EmailVerification::Table, EmailVerification::UserId)
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
            .drop_table(Table::drop().table(EmailVerification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmailVerification {
    #[sea_orm(iden = "email_verifications")]
    Table,
    Id,
    UserId,
    IsVerified,
    Token,
    TokenExpiry,
    CreatedAt,
    UpdatedAt,
}
