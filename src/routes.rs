//! Admin dashboard metrics endpoints.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{extract::{Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::get, Json, Router};
use chrono::Utc;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::analytics::{sales_breakdown, sales_summary, sales_trend, BreakdownReport, SalesSummary, TrendReport, Window, WindowParams};
use crate::store::{OrderStore, ProductCatalog};
use crate::AnalyticsError;

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderStore>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub metrics_timeout: Duration,
}

impl AppState {
    /// State backed by one store serving both orders and products.
    pub fn from_store<S: OrderStore + ProductCatalog + 'static>(store: S, metrics_timeout: Duration) -> Self {
        let store = Arc::new(store);
        Self { orders: store.clone(), catalog: store, metrics_timeout }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront-analytics"})) }))
        .route("/api/metrics/sales", get(summary))
        .route("/api/metrics/sales/trend", get(trend))
        .route("/api/metrics/sales/breakdown", get(breakdown))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()))
        .with_state(state)
}

/// A metrics request that could not be served. Clients only see a generic message.
#[derive(Error, Debug)]
#[error("{endpoint} metrics failed: {source}")]
pub struct ApiError { endpoint: &'static str, #[source] source: AnalyticsError }

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(endpoint = self.endpoint, error = %self.source, "Unable to retrieve metrics");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({"error": "Unable to retrieve metrics"}))).into_response()
    }
}

async fn bounded<T>(s: &AppState, endpoint: &'static str, work: impl Future<Output = crate::Result<T>>) -> Result<T, ApiError> {
    tokio::time::timeout(s.metrics_timeout, work).await
        .unwrap_or(Err(AnalyticsError::Timeout(s.metrics_timeout)))
        .map_err(|source| ApiError { endpoint, source })
}

async fn summary(State(s): State<AppState>) -> Result<Json<SalesSummary>, ApiError> {
    bounded(&s, "summary", sales_summary(s.orders.as_ref())).await.map(Json)
}

async fn trend(State(s): State<AppState>, Query(p): Query<WindowParams>) -> Result<Json<TrendReport>, ApiError> {
    let window = Window::resolve(&p, Utc::now());
    bounded(&s, "trend", sales_trend(s.orders.as_ref(), &window, p.days())).await.map(Json)
}

async fn breakdown(State(s): State<AppState>, Query(p): Query<WindowParams>) -> Result<Json<BreakdownReport>, ApiError> {
    let window = Window::resolve(&p, Utc::now());
    bounded(&s, "breakdown", sales_breakdown(s.orders.as_ref(), s.catalog.as_ref(), &window)).await.map(Json)
}
