use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000003_create_users_table::User,
    m20260103_000010_create_properties_table::Property,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingCart::Table)
                    .if_not_exists()
                    .col(pk_auto(ShoppingCart::Id))
                    .col(integer(ShoppingCart::UserId))
                    .col(uuid(ShoppingCart::PropertyId))
                    .col(integer(ShoppingCart::Quantity).default(1))
                    .col(
                        timestamp_with_time_zone(ShoppingCart::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ShoppingCart::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_cart_user_id")
                            .from(ShoppingCart::Table, ShoppingCart::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_cart_property_id")
                            .from(ShoppingCart::Table, ShoppingCart::PropertyId)
                            .to(Property::Table, Property::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shopping_cart_user_property")
                    .table(ShoppingCart::Table)
                    .col(ShoppingCart::UserId)
                    .col(ShoppingCart::PropertyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShoppingCart::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ShoppingCart {
    #[sea_orm(iden = "shopping_cart")]
    Table,
    Id,
    UserId,
    PropertyId,
    Quantity,
    CreatedAt,
    UpdatedAt,
}
