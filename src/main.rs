use rusty_library_lending::{
    adapters::SystemClock,
    api::{handlers::AppState, router::create_router},
    config::LendingConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_library_lending=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LendingConfig::from_env().expect("Invalid lending configuration");

    tracing::info!(
        loan_period_days = config.loan_period.days(),
        late_fee_per_day = config.daily_rate.value(),
        overdue_boundary = config.overdue_boundary.as_str(),
        currency = %config.currency_code,
        "lending policy loaded"
    );

    let addr = format!("0.0.0.0:{}", config.port);

    // Create application state
    let app_state = Arc::new(AppState {
        config,
        clock: Arc::new(SystemClock::new()),
    });

    // Create router
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
