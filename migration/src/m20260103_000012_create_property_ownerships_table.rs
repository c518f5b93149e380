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
                    .table(PropertyOwnership::Table)
                    .if_not_exists()
                    .col(pk_auto(PropertyOwnership::Id))
                    .col(uuid(PropertyOwnership::PropertyId))
                    .col(integer(PropertyOwnership::UserId))
                    .col(string(PropertyOwnership::UserType))
                    .col(integer(PropertyOwnership::PercentageOwnership))
                    .col(string(PropertyOwnership::Status).default("PENDING"))
                    .col(
                        timestamp_with_time_zone(PropertyOwnership::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(PropertyOwnership::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_ownerships_property_id")
                            .from(PropertyOwnership::Table, PropertyOwnership::PropertyId)
                            .to(Property::Table, Property::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_ownerships_user_id")
                            .from(PropertyOwnership::Table, PropertyOwnership::UserId)
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
            .drop_table(Table::drop().table(PropertyOwnership::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PropertyOwnership {
    #[sea_orm(iden = "property_ownerships")]
    Table,
    Id,
    PropertyId,
    UserId,
    UserType,
    PercentageOwnership,
    Status,
    CreatedAt,
    UpdatedAt,
}
