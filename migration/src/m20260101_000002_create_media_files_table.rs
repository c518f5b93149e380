use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_media_albums_table::MediaAlbum;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaFile::Table)
                    .if_not_exists()
                    .col(pk_auto(MediaFile::Id))
                    .col(integer(MediaFile::AlbumId))
                    .col(string_null(MediaFile::Name))
                    .col(string_null(MediaFile::Image))
                    .col(string_null(MediaFile::Document))
                    .col(string(MediaFile::MediaType).default("IMAGE"))
                    .col(
                        timestamp_with_time_zone(MediaFile::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_files_album_id")
                            .from(MediaFile::Table, MediaFile::AlbumId)
                            .to(MediaAlbum::Table, MediaAlbum::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MediaFile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MediaFile {
    #[sea_orm(iden = "media_files")]
    Table,
    Id,
    AlbumId,
    Name,
    Image,
    Document,
    MediaType,
    CreatedAt,
}
