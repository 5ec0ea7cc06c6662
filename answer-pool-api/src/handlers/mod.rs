pub mod actions;

use crate::allocation::SheetLayout;
use crate::storage::SheetStore;
use actix_web::web;
use std::sync::Arc;

/// Shared by every worker: the sheet store and which sheets to use
#[derive(Clone)]
pub struct AllocationState {
    pub store: Arc<dyn SheetStore>,
    pub layout: SheetLayout,
}

impl AllocationState {
    pub fn new(store: Arc<dyn SheetStore>, layout: SheetLayout) -> Self {
        Self { store, layout }
    }
}

/// Largest POST body accepted by the action endpoint
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Mounts the action endpoint at `/` and at `/exec`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES));

    for path in ["/", "/exec"] {
        cfg.route(path, web::get().to(actions::get_action))
            .route(path, web::post().to(actions::post_action));
    }
}
