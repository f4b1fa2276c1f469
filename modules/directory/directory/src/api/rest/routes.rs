use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::module::ConcreteAppServices;

/// Register the `/v1` surface and the health probe.
///
/// Every method router and the router itself fall back to
/// [`handlers::fallback`], so unsupported methods on known paths get the same
/// error envelope as unknown paths.
#[must_use]
pub fn register_routes(router: Router, services: Arc<ConcreteAppServices>) -> Router {
    router
        .route("/health", get(handlers::health))
        // Reads
        .route(
            "/v1/permissions",
            get(handlers::list_permissions).fallback(handlers::fallback),
        )
        .route(
            "/v1/users",
            get(handlers::list_users).fallback(handlers::fallback),
        )
        .route(
            "/v1/contacts",
            get(handlers::get_contacts).fallback(handlers::fallback),
        )
        // Admin writes
        .route(
            "/v1/admin/permissions",
            post(handlers::create_permission)
                .delete(handlers::delete_permission)
                .fallback(handlers::fallback),
        )
        .route(
            "/v1/admin/users",
            post(handlers::assign_user)
                .delete(handlers::remove_user)
                .fallback(handlers::fallback),
        )
        .route(
            "/v1/admin/contacts",
            post(handlers::create_contact)
                .delete(handlers::delete_contact)
                .fallback(handlers::fallback),
        )
        .fallback(handlers::fallback)
        .layer(Extension(services))
}
