//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Table and column names are the contract with the relational store.

pub mod order;
pub mod order_product;
pub mod product;
pub mod product_variant;
pub mod review;
pub mod search_outbox;
pub mod user;
pub mod variant_image;
pub mod variant_tag;
