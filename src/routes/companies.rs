use crate::handlers::companies::{create, delete, list, read, read_with_invoices, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn company_routes(state: AppState) -> Router {
    Router::new()
        .route("/companies", get(list).post(create))
        .route("/companies/:code", get(read).put(update).delete(delete))
        .route("/companies/code/:code", get(read_with_invoices))
        .with_state(state)
}
