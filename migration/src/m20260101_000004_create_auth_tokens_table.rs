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
                    .table(AuthToken::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthToken::Id))
                    .col(string_uniq(AuthToken::Token))
                    .col(integer(AuthToken::UserId))
                    .col(string(AuthToken::Kind))
                    .col(timestamp_with_time_zone(AuthToken::ExpiresAt))
                    .col(
                        timestamp_with_time_zone(AuthToken::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_tokens_user_id")
                            .from(AuthToken::Table, AuthToken::UserId)
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
            .drop_table(Table::drop().table(AuthToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AuthToken {
    #[sea_orm(iden = "auth_tokens")]
    Table,
    Id,
    Token,
    UserId,
    Kind,
    ExpiresAt,
    CreatedAt,
}
