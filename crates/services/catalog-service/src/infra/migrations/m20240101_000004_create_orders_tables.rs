//! Migration: Create orders and order line items.

use sea_orm_migration::prelude::*;

use super::{ProductVariants, Products, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::UserId).uuid().not_null())
                    .col(ColumnDef::new(Orders::Total).float().not_null())
                    .col(ColumnDef::new(Orders::Status).text().not_null())
                    .col(
                        ColumnDef::new(Orders::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orders::ReceiptUrl).text().null())
                    .col(ColumnDef::new(Orders::PaymentIntentId).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user_id")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderProducts::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(OrderProducts::ProductVariantId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrderProducts::ProductId).integer().not_null())
                    .col(ColumnDef::new(OrderProducts::OrderId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_products_variant_id")
                            .from(OrderProducts::Table, OrderProducts::ProductVariantId)
                            .to(ProductVariants::Table, ProductVariants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_products_product_id")
                            .from(OrderProducts::Table, OrderProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_products_order_id")
                            .from(OrderProducts::Table, OrderProducts::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    Total,
    Status,
    Created,
    ReceiptUrl,
    PaymentIntentId,
}

#[derive(DeriveIden)]
enum OrderProducts {
    Table,
    Id,
    Quantity,
    ProductVariantId,
    ProductId,
    OrderId,
}
