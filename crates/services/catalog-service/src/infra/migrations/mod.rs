//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_catalog_tables;
mod m20240101_000003_create_reviews_table;
mod m20240101_000004_create_orders_tables;
mod m20240101_000005_create_search_outbox;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_catalog_tables::Migration),
            Box::new(m20240101_000003_create_reviews_table::Migration),
            Box::new(m20240101_000004_create_orders_tables::Migration),
            Box::new(m20240101_000005_create_search_outbox::Migration),
        ]
    }
}

/// Identifiers shared by migrations that reference earlier tables.
#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Name,
    Email,
    EmailVerified,
    Image,
    Password,
    Role,
    TwoFactorEnabled,
    CustomerId,
}

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    Id,
    Title,
    Description,
    Price,
    Created,
}

#[derive(DeriveIden)]
pub(crate) enum ProductVariants {
    Table,
    Id,
    ProductId,
    Color,
    ProductType,
    Updated,
}
