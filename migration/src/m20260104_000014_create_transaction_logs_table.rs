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
                    .table(TransactionLog::Table)
                    .if_not_exists()
                    .col(pk_auto(TransactionLog::Id))
                    .col(string_len_null(TransactionLog::PropertyName, 256))
                    .col(string_len(TransactionLog::Reference, 256))
                    .col(uuid(TransactionLog::PropertyId))
                    .col(integer(TransactionLog::AgentId))
                    .col(integer(TransactionLog::ClientId))
                    .col(big_integer(TransactionLog::Amount))
                    .col(integer(TransactionLog::NumberOfShares))
                    .col(string_len(TransactionLog::Status, 256).default("PENDING"))
                    .col(string_len(TransactionLog::PaymentMethod, 256).default("PAYSTACK"))
                    .col(text_null(TransactionLog::ErrorMessageFromPaymentService))
                    .col(
                        timestamp_with_time_zone(TransactionLog::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(TransactionLog::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_logs_property_id")
                            .from(TransactionLog::Table, TransactionLog::PropertyId)
                            .to(Property::Table, Property::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_logs_agent_id")
                            .from(TransactionLog::Table, TransactionLog::AgentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_logs_client_id")
                            .from(TransactionLog::Table, TransactionLog::ClientId)
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
            .drop_table(Table::drop().table(TransactionLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TransactionLog {
    #[sea_orm(iden = "transaction_logs")]
    Table,
    Id,
    PropertyName,
    Reference,
    PropertyId,
    AgentId,
    ClientId,
    Amount,
    NumberOfShares,
    Status,
    PaymentMethod,
    ErrorMessageFromPaymentService,
    CreatedAt,
    UpdatedAt,
}
