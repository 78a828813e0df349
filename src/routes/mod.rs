//! Router assembly.

pub mod common;
pub mod companies;
pub mod invoices;

pub use common::common_routes;
pub use companies::company_routes;
pub use invoices::invoice_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: operational, company and invoice routes with tracing and a request body cap.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(company_routes(state.clone()))
        .merge(invoice_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}
