//! Route registration and the standalone form server.
//!
//! Mounts one GET route per indexed form path. Routes come from index
//! keys, so each path is registered exactly once even when several JSON
//! files claim it (the last definition won at index build time).

use std::sync::Arc;

use axum::Router;
use axum::response::Html;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::index::FormIndex;
use crate::render::FormRenderer;

async fn health() -> &'static str {
    "OK"
}

/// Build a router with one GET route per indexed form path, plus
/// `/health`.
pub fn form_router(renderer: Arc<FormRenderer>) -> Router {
    let mut router = Router::new().route("/health", get(health));

    for path in renderer.index().paths() {
        let route = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let form_path = path.to_string();
        let renderer = renderer.clone();

        router = router.route(
            &route,
            get(move || {
                let renderer = renderer.clone();
                let form_path = form_path.clone();
                async move { renderer.load_form(&form_path).map(Html) }
            }),
        );
    }

    router.layer(TraceLayer::new_for_http())
}

/// Scan the template root, index every form, and serve until ctrl-c.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    crate::logging::init_with_config(&settings.logging);

    let index = Arc::new(FormIndex::load(&settings.templates_dir)?);
    if index.is_empty() {
        tracing::warn!(
            "no forms found under {}",
            settings.templates_dir.display()
        );
    }

    let renderer = Arc::new(FormRenderer::new(&settings, index)?);
    let router = form_router(renderer);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind).await?;
    tracing::info!("listening on http://{}", settings.server.bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl+c");
    tracing::info!("received shutdown signal");
}
