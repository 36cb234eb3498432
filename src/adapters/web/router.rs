use std::{path::Path, sync::Arc};

use axum::{extract::State, response::Html, routing::get, Router};
use error_stack::ResultExt;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, instrument};

use super::{error_response::ErrorResponse, page_renderer::PageRenderer};
use crate::application::dashboard_service::{DashboardError, DashboardService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub service: DashboardService,
    pub renderer: Arc<PageRenderer>,
}

/// `GET /` renders the dashboard, `GET /static/*` serves files from `static_dir`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[instrument(skip(state))]
async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, ErrorResponse> {
    let report = state.service.report().await?;
    let page = state
        .renderer
        .render(&report)
        .await
        .change_context(DashboardError::Render)?;
    Ok(Html(page))
}

pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    info!("Server started at http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
