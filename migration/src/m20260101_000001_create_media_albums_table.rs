use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaAlbum::Table)
                    .if_not_exists()
                    .col(pk_auto(MediaAlbum::Id))
                    .col(
                        timestamp_with_time_zone(MediaAlbum::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MediaAlbum::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MediaAlbum {
    #[sea_orm(iden = "media_albums")]
    Table,
    Id,
    CreatedAt,
}
