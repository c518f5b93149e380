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
                    .table(PropertyInspection::Table)
                    .if_not_exists()
                    .col(pk_auto(PropertyInspection::Id))
                    .col(uuid(PropertyInspection::PropertyId))
                    .col(integer(PropertyInspection::AgentId))
                    .col(string_len_null(PropertyInspection::AgentPhone, 256))
                    .col(string_len_null(PropertyInspection::AgentFirstname, 256))
                    .col(string_len_null(PropertyInspection::AgentLastname, 256))
                    .col(string_len_null(PropertyInspection::CompanyName, 256))
                    .col(integer(PropertyInspection::ClientId))
                    .col(string_len_null(PropertyInspection::ClientPhone, 256))
                    .col(string_len_null(PropertyInspection::ClientFirstname, 256))
                    .col(string_len_null(PropertyInspection::ClientLastname, 256))
                    .col(timestamp_with_time_zone(PropertyInspection::InspectionDate))
                    .col(string_len(PropertyInspection::Status, 256).default("PENDING"))
                    .col(
                        timestamp_with_time_zone(PropertyInspection::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(PropertyInspection::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_inspections_property_id")
                            .from(PropertyInspection::Table, PropertyInspection::PropertyId)
                            .to(Property::Table, Property::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_inspections_agent_id")
                            .from(PropertyInspection::Table, PropertyInspection::AgentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_inspections_client_id")
                            .from(PropertyInspection::Table, PropertyInspection::ClientId)
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
            .drop_table(Table::drop().table(PropertyInspection::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PropertyInspection {
    #[sea_orm(iden = "property_inspections")]
    Table,
    Id,
    PropertyId,
    AgentId,
    AgentPhone,
    AgentFirstname,
    AgentLastname,
    CompanyName,
    ClientId,
    ClientPhone,
    ClientFirstname,
    ClientLastname,
    InspectionDate,
    Status,
    CreatedAt,
    UpdatedAt,
}
