pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use logic::{
    check_invariants, display_name, soften, to_hex, to_hsl, InvariantViolation, Navigator,
    MAX_NESTED_DEPTH,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{DomainRegistry, MemoryStore, TagRepository, Taxonomy, TaxonomyStore};

/// Seed the store from configuration and serve the HTTP API until shutdown
pub async fn run_server(config: &config::AppConfig) -> anyhow::Result<()> {
    use axum::serve;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    let taxonomy = seed::initial_taxonomy(&config.seed)?;
    let store = Arc::new(MemoryStore::new(taxonomy));

    let app = api::routes::create_router().with_state(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Tag taxonomy server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
