use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::TaxonomyStore;

pub fn create_router<S: TaxonomyStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Tag queries and mutations
        .route(
            "/tags",
            get(handlers::list_tags::<S>).post(handlers::create_tag::<S>),
        )
        .route("/tags/roots", get(handlers::list_root_tags::<S>))
        .route("/tags/tree", get(handlers::get_tag_tree::<S>))
        .route(
            "/tags/:tag_id",
            get(handlers::get_tag::<S>)
                .patch(handlers::update_tag::<S>)
                .delete(handlers::delete_tag::<S>),
        )
        // Hierarchy navigation
        .route("/tags/:tag_id/hierarchy", get(handlers::get_tag_hierarchy::<S>))
        .route("/tags/:tag_id/descendants", get(handlers::get_descendants::<S>))
        .route("/tags/:tag_id/subtree", get(handlers::get_subtree::<S>))
        .route("/tags/:tag_id/root-color", get(handlers::get_root_color::<S>))
        // Domain registry
        .route(
            "/domains",
            get(handlers::list_domains::<S>).post(handlers::add_domain::<S>),
        )
        .route(
            "/domains/:label",
            delete(handlers::remove_domain::<S>),
        )
        // Whole-taxonomy import/export
        .route(
            "/snapshot",
            get(handlers::export_snapshot::<S>).put(handlers::replace_snapshot::<S>),
        )
}
