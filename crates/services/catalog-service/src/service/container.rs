//! Service Container - Centralized service access.
//!
//! Wires the persistence layer, the search outbox and the view cache into
//! the three catalog services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use common::OutboxConfig;
use domain::Clock;

use super::{
    ProductManager, ProductService, ReviewManager, ReviewService, VariantManager, VariantService,
};
use crate::infra::{Persistence, ViewCache, ViewInvalidator};
use crate::search::{SearchIndex, SearchSync};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn variants(&self) -> Arc<dyn VariantService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;

    fn products(&self) -> Arc<dyn ProductService>;
}

/// External collaborators shared by every service.
#[derive(Clone)]
pub struct Collaborators {
    pub index: Arc<dyn SearchIndex>,
    pub views: Arc<dyn ViewInvalidator>,
    pub cache: Arc<dyn ViewCache>,
    pub clock: Arc<dyn Clock>,
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    variant_service: Arc<dyn VariantService>,
    review_service: Arc<dyn ReviewService>,
    product_service: Arc<dyn ProductService>,
    sync: SearchSync,
}

impl Services {
    /// Create the service container from a database connection.
    pub fn from_connection(
        db: DatabaseConnection,
        collaborators: Collaborators,
        outbox: OutboxConfig,
        placeholder_image: String,
    ) -> Self {
        let persistence = Persistence::new(db);
        let sync = SearchSync::new(
            persistence.clone(),
            collaborators.index.clone(),
            collaborators.clock.clone(),
            outbox,
        );

        let variant_service = Arc::new(VariantManager::new(
            persistence.clone(),
            sync.clone(),
            collaborators.views.clone(),
            collaborators.clock.clone(),
        ));
        let review_service = Arc::new(ReviewManager::new(
            persistence.clone(),
            collaborators.views.clone(),
            collaborators.clock.clone(),
        ));
        let product_service = Arc::new(ProductManager::new(
            persistence,
            sync.clone(),
            collaborators.views,
            collaborators.cache,
            collaborators.clock,
            placeholder_image,
        ));

        Self {
            variant_service,
            review_service,
            product_service,
            sync,
        }
    }

    /// Outbox relay sharing this container's index and clock.
    pub fn search_sync(&self) -> &SearchSync {
        &self.sync
    }
}

impl ServiceContainer for Services {
    fn variants(&self) -> Arc<dyn VariantService> {
        self.variant_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }
}
