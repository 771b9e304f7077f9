//! Migration: Create the search index outbox.
//!
//! Rows are written in the same transaction as the catalog change they
//! describe and stay until the relay marks them delivered. `claimed_until`
//! is the lease a relay holds while it applies a row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchOutbox::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchOutbox::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchOutbox::ObjectId).text().not_null())
                    .col(ColumnDef::new(SearchOutbox::Operation).json().not_null())
                    .col(
                        ColumnDef::new(SearchOutbox::Attempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SearchOutbox::LastError).text().null())
                    .col(
                        ColumnDef::new(SearchOutbox::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SearchOutbox::Delivered)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SearchOutbox::ClaimedUntil)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_outbox_delivered")
                    .table(SearchOutbox::Table)
                    .col(SearchOutbox::Delivered)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_outbox_object_id")
                    .table(SearchOutbox::Table)
                    .col(SearchOutbox::ObjectId)
                    .col(SearchOutbox::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchOutbox::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchOutbox {
    Table,
    Id,
    ObjectId,
    Operation,
    Attempts,
    LastError,
    Created,
    Delivered,
    ClaimedUntil,
}
