use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use answer_pool_api::allocation::SheetLayout;
use answer_pool_api::handlers::{self, AllocationState};
use answer_pool_api::helpers::cors::build_cors;
use answer_pool_api::helpers::database::open_in_memory;
use answer_pool_api::helpers::sheets::initialize_sheets;
use answer_pool_api::storage::{SheetStore, SqliteSheetStore};
use std::sync::Arc;

/// What the app produces once wrapped in the CORS middleware
pub type CorsResponse = ServiceResponse<EitherBody<BoxBody>>;

pub struct TestApp<S> {
    pub store: Arc<dyn SheetStore>,
    pub layout: SheetLayout,
    pub app: S,
}

/// App over an in-memory store whose sheets hold `answers`
pub async fn setup_test_app(
    answers: &[&str],
) -> anyhow::Result<
    TestApp<
        impl Service<actix_http::Request, Response = CorsResponse, Error = actix_web::Error>,
    >,
> {
    let store: Arc<dyn SheetStore> = Arc::new(SqliteSheetStore::new(open_in_memory()?));
    let layout = SheetLayout::default();
    initialize_sheets(store.as_ref(), &layout, answers).await?;

    Ok(init_app(store, layout).await)
}

/// App over an in-memory store that has no sheets at all
pub async fn setup_test_app_without_sheets() -> anyhow::Result<
    TestApp<
        impl Service<actix_http::Request, Response = CorsResponse, Error = actix_web::Error>,
    >,
> {
    let store: Arc<dyn SheetStore> = Arc::new(SqliteSheetStore::new(open_in_memory()?));

    Ok(init_app(store, SheetLayout::default()).await)
}

async fn init_app(
    store: Arc<dyn SheetStore>,
    layout: SheetLayout,
) -> TestApp<
    impl Service<actix_http::Request, Response = CorsResponse, Error = actix_web::Error>,
> {
    let state = web::Data::new(AllocationState::new(store.clone(), layout.clone()));

    let app = test::init_service(
        App::new()
            .wrap(build_cors(None))
            .app_data(state)
            .configure(handlers::configure),
    )
    .await;

    TestApp { store, layout, app }
}

pub fn submit_body(name: &str, answer_id: &str, timestamp: &str) -> serde_json::Value {
    serde_json::json!({
        "action": "submitResponse",
        "name": name,
        "selectedAnswerId": answer_id,
        "timestamp": timestamp,
    })
}
