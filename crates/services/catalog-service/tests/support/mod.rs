//! Shared fixtures: in-memory SQLite with the real migrations, a recording
//! search index, an in-memory view cache and a controllable clock.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use catalog_service_lib::infra::{Database, Persistence, ViewCache, ViewInvalidator};
use catalog_service_lib::repository::entities::{order, order_product, product, user};
use catalog_service_lib::search::{IndexOperation, SearchDocument, SearchIndex, SearchPatch};
use catalog_service_lib::service::{Collaborators, Services};
use common::{AppError, AppResult, DatabaseConfig, OutboxConfig};
use domain::{Clock, CurrentUser, ProductId, UserRole};

pub const PLACEHOLDER: &str = "/placeholder.jpg";
pub const MAX_ATTEMPTS: i32 = 3;
pub const LEASE_SECONDS: i64 = 30;

/// Clock that only moves when told to.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Search index that records operations, keeps the resulting documents and
/// can be switched to fail.
#[derive(Default)]
pub struct RecordingIndex {
    operations: Mutex<Vec<IndexOperation>>,
    documents: Mutex<HashMap<String, SearchDocument>>,
    failing: AtomicBool,
}

impl RecordingIndex {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn operations(&self) -> Vec<IndexOperation> {
        self.operations.lock().unwrap().clone()
    }

    /// Indexed document for an object id, as the provider would hold it.
    pub fn document(&self, object_id: &str) -> Option<SearchDocument> {
        self.documents.lock().unwrap().get(object_id).cloned()
    }

    fn record(&self, operation: IndexOperation) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::search_index("503 Service Unavailable"));
        }
        let mut documents = self.documents.lock().unwrap();
        match &operation {
            IndexOperation::Save { document } => {
                documents.insert(document.object_id.clone(), document.clone());
            }
            IndexOperation::PartialUpdate { patch } => {
                if let Some(document) = documents.get_mut(&patch.object_id) {
                    document.id = patch.id;
                    document.product_type = patch.product_type.clone();
                    document.variant_images = patch.variant_images.clone();
                }
            }
            IndexOperation::Delete { object_id } => {
                documents.remove(object_id);
            }
        }
        self.operations.lock().unwrap().push(operation);
        Ok(())
    }
}

#[async_trait]
impl SearchIndex for RecordingIndex {
    async fn save_object(&self, document: &SearchDocument) -> AppResult<()> {
        self.record(IndexOperation::Save {
            document: document.clone(),
        })
    }

    async fn partial_update_object(&self, patch: &SearchPatch) -> AppResult<()> {
        self.record(IndexOperation::PartialUpdate {
            patch: patch.clone(),
        })
    }

    async fn delete_object(&self, object_id: &str) -> AppResult<()> {
        self.record(IndexOperation::Delete {
            object_id: object_id.to_string(),
        })
    }
}

/// View cache backed by a map; invalidation bumps the path's generation and
/// removes the entry.
#[derive(Default)]
pub struct MemoryViews {
    entries: Mutex<HashMap<String, String>>,
    generations: Mutex<HashMap<String, u64>>,
    invalidated: Mutex<Vec<String>>,
}

impl MemoryViews {
    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated.lock().unwrap().clone()
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }
}

#[async_trait]
impl ViewInvalidator for MemoryViews {
    async fn revalidate_path(&self, path: &str) {
        *self
            .generations
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default() += 1;
        self.entries.lock().unwrap().remove(path);
        self.invalidated.lock().unwrap().push(path.to_string());
    }
}

#[async_trait]
impl ViewCache for MemoryViews {
    async fn get_json(&self, path: &str) -> Option<String> {
        self.entries.lock().unwrap().get(path).cloned()
    }

    async fn generation(&self, path: &str) -> Option<u64> {
        Some(self.generations.lock().unwrap().get(path).copied().unwrap_or(0))
    }

    async fn set_json_if(&self, path: &str, json: String, generation: u64) -> bool {
        let generations = self.generations.lock().unwrap();
        if generations.get(path).copied().unwrap_or(0) != generation {
            return false;
        }
        self.entries.lock().unwrap().insert(path.to_string(), json);
        true
    }
}

pub struct TestApp {
    pub database: Arc<Database>,
    pub db: DatabaseConnection,
    pub persistence: Persistence,
    pub services: Services,
    pub index: Arc<RecordingIndex>,
    pub views: Arc<MemoryViews>,
    pub clock: Arc<TestClock>,
}

/// Fresh in-memory database with all migrations applied.
pub async fn connect() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    Database::connect(&config)
        .await
        .expect("in-memory sqlite with migrations")
}

pub fn outbox_config() -> OutboxConfig {
    OutboxConfig {
        batch_size: 50,
        max_attempts: MAX_ATTEMPTS,
        poll_interval_ms: 10,
        lease_seconds: LEASE_SECONDS,
    }
}

pub async fn setup() -> TestApp {
    setup_with_cache(|_, views| views as Arc<dyn ViewCache>).await
}

/// Like [`setup`], with the view cache built from the database and the
/// in-memory views.
pub async fn setup_with_cache<F>(cache: F) -> TestApp
where
    F: FnOnce(&DatabaseConnection, Arc<MemoryViews>) -> Arc<dyn ViewCache>,
{
    let database = Arc::new(connect().await);
    let db = database.get_connection();
    let index = Arc::new(RecordingIndex::default());
    let views = Arc::new(MemoryViews::default());
    let clock = Arc::new(TestClock::new());
    let cache = cache(&db, views.clone());

    let services = Services::from_connection(
        db.clone(),
        Collaborators {
            index: index.clone(),
            views: views.clone(),
            cache,
            clock: clock.clone(),
        },
        outbox_config(),
        PLACEHOLDER.to_string(),
    );

    TestApp {
        database,
        persistence: Persistence::new(db.clone()),
        db,
        services,
        index,
        views,
        clock,
    }
}

/// Insert an account the way the external auth provider would.
pub async fn seed_user(db: &DatabaseConnection, role: UserRole) -> CurrentUser {
    let id = Uuid::new_v4();
    let email = format!("{}@example.com", id.simple());
    user::ActiveModel {
        id: Set(id),
        name: Set(Some("Test User".to_string())),
        email: Set(Some(email.clone())),
        email_verified: Set(None),
        image: Set(None),
        password: Set(None),
        role: Set(role.to_string()),
        two_factor_enabled: Set(false),
        customer_id: Set(None),
    }
    .insert(db)
    .await
    .expect("insert user");

    CurrentUser { id, email, role }
}

pub async fn seed_product(db: &DatabaseConnection, title: &str, price: f32) -> ProductId {
    product::ActiveModel {
        title: Set(title.to_string()),
        description: Set(format!("{} description", title)),
        price: Set(price),
        created: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert product")
    .id
}

/// Order with a single line for the given variant.
pub async fn seed_order_line(
    db: &DatabaseConnection,
    user_id: Uuid,
    product_id: ProductId,
    variant_id: i32,
) -> i32 {
    let order = order::ActiveModel {
        user_id: Set(user_id),
        total: Set(10.0),
        status: Set("succeeded".to_string()),
        created: Set(Utc::now()),
        receipt_url: Set(None),
        payment_intent_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert order");

    order_product::ActiveModel {
        quantity: Set(1),
        product_variant_id: Set(variant_id),
        product_id: Set(product_id),
        order_id: Set(order.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert order line")
    .id
}
