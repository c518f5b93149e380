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
                    .table(PasswordReset::Table)
                    .if_not_exists()
                    .col(pk_auto(PasswordReset::Id))
                    .col(integer(PasswordReset::UserId))
                    .col(string_uniq(PasswordReset::Token))
                    .col(boolean(PasswordReset::Used).default(false))
                    .col(timestamp_with_time_zone(PasswordReset::ExpiresAt))
                    .col(
                        timestamp_with_time_zone(PasswordReset::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(PasswordReset::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_password_resets_user_id")
                            .from(PasswordReset::Table, PasswordReset::UserId)
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
            .drop_table(Table::drop().table(PasswordReset::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PasswordReset {
    #[sea_orm(iden = "password_resets")]
    Table,
    Id,
    UserId,
    Token,
    Used,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
