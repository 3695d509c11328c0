//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database connection, migrations, service
//! wiring and the Axum server lifecycle.

use crate::application::event_handlers::{NOTIFIED_EVENTS, NotificationEventHandler};
use crate::application::services::{
    AvailabilityService, EquipmentService, MemberService, RentalService, ReservationService,
};
use crate::config::{Config, StorageKind};
use crate::domain::ports::{Clock, EventPublisher, NotificationService, PaymentService, SystemClock};
use crate::domain::repositories::Repositories;
use crate::infrastructure::events::InMemoryEventBus;
use crate::infrastructure::memory::memory_repositories;
use crate::infrastructure::notification::LoggingNotificationService;
use crate::infrastructure::payment::SimulatedPaymentService;
use crate::infrastructure::persistence::pg_repositories;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Wires services over `repositories`.
///
/// Handlers share one availability service, and reservations reuse the
/// rental service for fulfilment.
pub fn build_state(
    repositories: Repositories,
    events: Arc<dyn EventPublisher>,
    payments: Arc<dyn PaymentService>,
    clock: Arc<dyn Clock>,
) -> AppState {
    let availability = Arc::new(AvailabilityService::new(
        repositories.rentals.clone(),
        repositories.reservations.clone(),
    ));

    let equipment_service = Arc::new(EquipmentService::new(
        repositories.equipment.clone(),
        availability.clone(),
        events.clone(),
        clock.clone(),
    ));
    let member_service = Arc::new(MemberService::new(
        repositories.members.clone(),
        repositories.rentals.clone(),
        events.clone(),
        clock.clone(),
    ));
    let rental_service = Arc::new(RentalService::new(
        &repositories,
        availability.clone(),
        payments,
        events.clone(),
        clock.clone(),
    ));
    let reservation_service = Arc::new(ReservationService::new(
        repositories.reservations.clone(),
        repositories.equipment.clone(),
        repositories.members.clone(),
        availability,
        rental_service.clone(),
        events,
        clock.clone(),
    ));

    AppState {
        equipment_service,
        member_service,
        rental_service,
        reservation_service,
        storage: repositories.health,
        clock,
    }
}

/// Event bus with the notification handler subscribed to member-facing events.
pub fn event_bus(notifier: Arc<dyn NotificationService>) -> Arc<InMemoryEventBus> {
    let bus = Arc::new(InMemoryEventBus::new());
    let subscriptions =
        bus.subscribe_all(&NOTIFIED_EVENTS, Arc::new(NotificationEventHandler::new(notifier)));
    tracing::debug!(count = subscriptions.len(), "Notification handler subscribed");
    bus
}

/// Opens the PostgreSQL pool, retrying with exponential backoff.
///
/// # Errors
///
/// Returns the last connection error once `config.db_connect_retries`
/// retries are exhausted.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)));

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(config.db_connect_retries);

    let mut attempt = 0u32;
    let pool = Retry::start(strategy, || {
        attempt += 1;
        let current = attempt;
        let options = options.clone();
        let url = config.database_url.clone();
        async move {
            options.connect(&url).await.inspect_err(|e| {
                tracing::warn!(attempt = current, error = %e, "Database connection failed");
            })
        }
    })
    .await
    .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Repositories (PostgreSQL with migrations, or in-memory)
/// - Event bus with the notification handler
/// - Application services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repositories = match config.storage {
        StorageKind::Postgres => {
            let pool = connect_database(&config).await?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");
            pg_repositories(Arc::new(pool))
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            memory_repositories()
        }
    };

    let events = event_bus(Arc::new(LoggingNotificationService));
    let state = build_state(
        repositories,
        events,
        Arc::new(SimulatedPaymentService),
        Arc::new(SystemClock),
    );

    let app = app_router(state, &config)?;

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
