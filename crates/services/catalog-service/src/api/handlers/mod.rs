//! Request handlers.

pub mod health_handler;
pub mod product_handler;
pub mod review_handler;
pub mod variant_handler;

pub use health_handler::health_check;
pub use product_handler::product_routes;
pub use review_handler::review_routes;
pub use variant_handler::variant_routes;
