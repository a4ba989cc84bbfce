use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, borrowing_status, create_borrowing, late_fee, overdue_borrowings, propose_due_date,
    return_borrowing, search_borrowings, search_reservations,
};

/// Creates the API router with all borrowing lifecycle endpoints
///
/// Calculation endpoints:
/// - POST /borrowings/status - Derive active / overdue / returned
/// - POST /borrowings/late-fee - Late fee for a due date and return date
/// - POST /borrowings/due-date - Default due date for a borrow date
///
/// Lifecycle endpoints:
/// - POST /borrowings - Validate a borrow form into a new record
/// - POST /borrowings/return - Return a copy and record the late fee
///
/// List endpoints:
/// - POST /borrowings/search
/// - POST /borrowings/overdue
/// - POST /reservations/search
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/borrowings", post(create_borrowing))
        .route("/borrowings/status", post(borrowing_status))
        .route("/borrowings/late-fee", post(late_fee))
        .route("/borrowings/due-date", post(propose_due_date))
        .route("/borrowings/return", post(return_borrowing))
        .route("/borrowings/search", post(search_borrowings))
        .route("/borrowings/overdue", post(overdue_borrowings))
        .route("/reservations/search", post(search_reservations))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
