//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::Database;
use crate::service::{ProductService, ReviewService, ServiceContainer, VariantService};

use super::TokenVerifier;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub variant_service: Arc<dyn VariantService>,
    pub review_service: Arc<dyn ReviewService>,
    pub product_service: Arc<dyn ProductService>,
    pub database: Arc<Database>,
    pub tokens: Arc<TokenVerifier>,
}

impl AppState {
    /// Create app state from a service container.
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Arc<Database>,
        tokens: Arc<TokenVerifier>,
    ) -> Self {
        Self {
            variant_service: container.variants(),
            review_service: container.reviews(),
            product_service: container.products(),
            database,
            tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DatabaseConnection;

    use crate::service::{
        MockProductService, MockReviewService, MockServiceContainer, MockVariantService,
    };

    #[test]
    fn test_state_takes_services_from_container() {
        let mut container = MockServiceContainer::new();
        container
            .expect_variants()
            .times(1)
            .returning(|| Arc::new(MockVariantService::new()) as Arc<dyn VariantService>);
        container
            .expect_reviews()
            .times(1)
            .returning(|| Arc::new(MockReviewService::new()) as Arc<dyn ReviewService>);
        container
            .expect_products()
            .times(1)
            .returning(|| Arc::new(MockProductService::new()) as Arc<dyn ProductService>);

        let database = Arc::new(Database::from_connection(DatabaseConnection::Disconnected));
        let verifier = Arc::new(TokenVerifier::new("s"));
        let state = AppState::from_container(&container, database, verifier);

        assert_eq!(Arc::strong_count(&state.tokens), 1);
    }
}
