//! Composition root: turns configuration into a running router.

use std::sync::Arc;

use axum::http::HeaderName;
use axum::Router;
use thiserror::Error;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::events::{InProcessEventBus, PaymentListenerHandler};
use crate::adapters::http::{payment_router, PaymentAppState, X_REQUEST_ID};
use crate::adapters::postgres::{run_migrations, PostgresNotificationRepository};
use crate::adapters::storage::InMemoryNotificationRepository;
use crate::adapters::templates::HtmlPageRenderer;
use crate::config::{AppConfig, ConfigError, ServerConfig, ValidationError};
use crate::domain::foundation::DomainError;
use crate::domain::payment::{GatewaySettings, PaymentVerifier};
use crate::ports::{NotificationRepository, PaymentListener};

/// Fatal errors raised while starting the service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(DomainError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for StartupError {
    fn from(err: ValidationError) -> Self {
        StartupError::Config(ConfigError::ValidationFailed(err))
    }
}

/// Collaborators the service is assembled from.
///
/// The event bus delivers to registered listeners only and keeps nothing;
/// tests swap in a capturing bus with [`AppComponents::with_event_bus`].
pub struct AppComponents {
    pub settings: Arc<GatewaySettings>,
    pub event_bus: Arc<InProcessEventBus>,
    pub notification_repository: Arc<dyn NotificationRepository>,
}

impl AppComponents {
    /// In-memory components, used when no database is configured.
    pub fn in_memory(settings: GatewaySettings) -> Self {
        Self {
            settings: Arc::new(settings),
            event_bus: Arc::new(InProcessEventBus::new()),
            notification_repository: Arc::new(InMemoryNotificationRepository::new()),
        }
    }

    /// Components for `config`: PostgreSQL storage when a database is configured.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let settings = config.gateway.to_settings()?;

        let notification_repository: Arc<dyn NotificationRepository> = match &config.database {
            Some(database) => {
                let pool = database.connect().await?;
                if database.run_migrations {
                    run_migrations(&pool).await.map_err(StartupError::Migration)?;
                }
                tracing::info!("Storing result notifications in PostgreSQL");
                Arc::new(PostgresNotificationRepository::new(pool))
            }
            None => {
                tracing::warn!(
                    "No database configured; result notifications are kept in memory"
                );
                Arc::new(InMemoryNotificationRepository::new())
            }
        };

        Ok(Self {
            settings: Arc::new(settings),
            event_bus: Arc::new(InProcessEventBus::new()),
            notification_repository,
        })
    }

    /// Replaces the event bus. Listeners registered on the old bus are dropped.
    pub fn with_event_bus(mut self, event_bus: Arc<InProcessEventBus>) -> Self {
        self.event_bus = event_bus;
        self
    }

    /// Routes payment events to an order-management listener.
    pub fn register_listener(&self, listener: Arc<dyn PaymentListener>) {
        PaymentListenerHandler::subscribe(self.event_bus.as_ref(), listener);
    }

    pub fn state(&self) -> PaymentAppState {
        PaymentAppState {
            verifier: PaymentVerifier::new(self.settings.clone()),
            notification_repository: self.notification_repository.clone(),
            event_publisher: self.event_bus.clone(),
            renderer: Arc::new(HtmlPageRenderer::new()),
        }
    }

    /// The full router with tracing, request-id and timeout layers.
    ///
    /// Each request gets an `x-request-id` (kept when the caller sent one),
    /// echoed on the response and used as the events' correlation id.
    pub fn router(&self, server: &ServerConfig) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        payment_router(self.settings.transport)
            .with_state(self.state())
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
            .layer(TimeoutLayer::new(server.request_timeout()))
    }
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve(config: AppConfig) -> Result<(), StartupError> {
    config.validate()?;
    let components = AppComponents::from_config(&config).await?;
    let router = components.router(&config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        transport = ?components.settings.transport,
        strict_check = components.settings.strict_check,
        test_mode = components.settings.test_mode,
        "Payment gateway callbacks listening"
    );

    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::domain::payment::PaymentEvent;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    const RESULT_42: &str = "OutSum=100.00&InvId=42&SignatureValue=80EE1288399472654F64A8EAF30CE477";

    fn settings() -> GatewaySettings {
        GatewaySettings::new("shop1", "pw1", "pw2")
    }

    fn config_without_database() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: None,
            gateway: GatewayConfig {
                merchant_login: "shop1".to_string(),
                password1: Some(SecretString::new("pw1".to_string())),
                password2: Some(SecretString::new("pw2".to_string())),
                form_target: crate::domain::payment::DEFAULT_FORM_TARGET.to_string(),
                recurring_form_target: crate::domain::payment::DEFAULT_RECURRING_FORM_TARGET
                    .to_string(),
                use_post: true,
                ..Default::default()
            },
        }
    }

    fn post_result(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/result/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn router_serves_health_behind_layers() {
        let components = AppComponents::in_memory(settings());

        let response = components
            .router(&ServerConfig::default())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    // ══════════════════════════════════════════════════════════════
    // Event Retention Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn configured_bus_keeps_no_events() {
        let components = AppComponents::from_config(&config_without_database())
            .await
            .unwrap();
        let router = components.router(&ServerConfig::default());

        for _ in 0..1000 {
            let response = router.clone().oneshot(post_result(RESULT_42)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert!(!components.event_bus.is_capturing());
        assert_eq!(components.event_bus.event_count(), 0);
        assert!(components
            .notification_repository
            .exists(crate::domain::payment::InvoiceId::new(42))
            .await
            .unwrap());
    }

    #[test]
    fn in_memory_bus_keeps_no_events() {
        assert!(!AppComponents::in_memory(settings()).event_bus.is_capturing());
    }

    // ══════════════════════════════════════════════════════════════
    // Request Id Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn caller_request_id_becomes_event_correlation_id() {
        let bus = Arc::new(InProcessEventBus::with_capture());
        let components = AppComponents::in_memory(settings()).with_event_bus(bus.clone());

        let mut request = post_result(RESULT_42);
        request
            .headers_mut()
            .insert(X_REQUEST_ID, "req-gateway-1".parse().unwrap());
        let response = components
            .router(&ServerConfig::default())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.headers()[X_REQUEST_ID], "req-gateway-1");
        let events = bus.events_of_type(PaymentEvent::NOTIFICATION_RECEIVED);
        assert_eq!(
            events[0].metadata.correlation_id.as_deref(),
            Some("req-gateway-1")
        );
    }

    #[tokio::test]
    async fn generated_request_id_matches_event_correlation_id() {
        let bus = Arc::new(InProcessEventBus::with_capture());
        let components = AppComponents::in_memory(settings()).with_event_bus(bus.clone());

        let response = components
            .router(&ServerConfig::default())
            .oneshot(post_result(RESULT_42))
            .await
            .unwrap();

        let echoed = response.headers()[X_REQUEST_ID].to_str().unwrap().to_string();
        let events = bus.published_events();
        assert_eq!(events[0].metadata.correlation_id, Some(echoed));
    }

    #[test]
    fn validation_error_converts_to_startup_error() {
        let err: StartupError = ValidationError::InvalidPort.into();
        assert!(err.to_string().contains("Invalid port number"));
    }
}
