use std::sync::Arc;

use axum::{Router, middleware};
use axum_helpers::admin_guard;
use domain_projects::{
    PgProjectRepository, ProjectService, SupabaseMediaStore, WebhookRevalidationNotifier, handlers,
};

use crate::state::AppState;

/// Wires the projects domain against its production adapters.
///
/// Reads are public; mutations go through the admin guard.
pub fn routes(state: &AppState) -> Router {
    let service = Arc::new(ProjectService::new(
        PgProjectRepository::new(state.db.clone()),
        SupabaseMediaStore::new(state.config.supabase.clone()),
        WebhookRevalidationNotifier::new(state.config.revalidate.clone()),
    ));

    let admin = handlers::admin_router(service.clone()).layer(middleware::from_fn_with_state(
        state.config.admins.clone(),
        admin_guard,
    ));

    handlers::public_router(service).merge(admin)
}
