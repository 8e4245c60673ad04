//! In-process event bus.
//!
//! Delivers events to subscribed handlers on the publishing task, in
//! subscription order. The binary uses a delivery-only bus (there is no
//! external broker); tests use [`InProcessEventBus::with_capture`] to inspect
//! everything that was published.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-process event bus.
///
/// Features:
/// - Synchronous delivery (every handler runs before `publish` returns)
/// - Optional event capture for assertions
/// - Handler failures are collected and reported together
///
/// A bus created with [`InProcessEventBus::new`] retains nothing after
/// delivery; the query helpers then report no events.
///
/// A poisoned lock is recovered rather than propagated: the maps it guards
/// are only ever appended to.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InProcessEventBus::with_capture());
/// bus.subscribe_all(&PaymentEvent::ALL_TYPES, handler);
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("payment.notification_received.v1"));
/// ```
pub struct InProcessEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: Option<RwLock<Vec<EventEnvelope>>>,
}

impl InProcessEventBus {
    /// Creates a delivery-only bus.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: None,
        }
    }

    /// Creates a bus that also keeps every published event.
    pub fn with_capture() -> Self {
        Self {
            published: Some(RwLock::new(Vec::new())),
            ..Self::new()
        }
    }

    /// True when published events are kept.
    pub fn is_capturing(&self) -> bool {
        self.published.is_some()
    }

    fn captured<R>(&self, f: impl FnOnce(&[EventEnvelope]) -> R) -> R {
        match &self.published {
            Some(published) => f(&read(published)),
            None => f(&[]),
        }
    }

    /// Returns all published events.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.captured(|events| events.to_vec())
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.captured(|events| {
            events
                .iter()
                .filter(|e| e.event_type == event_type)
                .cloned()
                .collect()
        })
    }

    /// Returns events for a specific aggregate (invoice).
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.captured(|events| {
            events
                .iter()
                .filter(|e| e.aggregate_id == aggregate_id)
                .cloned()
                .collect()
        })
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.captured(|events| events.len())
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.captured(|events| events.iter().any(|e| e.event_type == event_type))
    }

    /// Clears all published events.
    pub fn clear(&self) {
        if let Some(published) = &self.published {
            write(published).clear();
        }
    }
}

impl Default for InProcessEventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl EventPublisher for InProcessEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if let Some(published) = &self.published {
            write(published).push(event.clone());
        }

        // Clone handlers to release lock before await points
        let type_handlers: Vec<Arc<dyn EventHandler>> = read(&self.handlers)
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::error!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    error = %e,
                    "Event handler failed"
                );
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EventDeliveryFailed,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }
}

impl EventSubscriber for InProcessEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        write(&self.handlers)
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = write(&self.handlers);
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Invoice", json!({}))
    }

    struct CountingHandler {
        count: AtomicUsize,
    }

    impl CountingHandler {
        fn new() -> Self {
            Self {
                count: AtomicUsize::new(0),
            }
        }

        fn count(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "boom"))
        }

        fn name(&self) -> &'static str {
            "FailingHandler"
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Publishing Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn publish_stores_event() {
        let bus = InProcessEventBus::with_capture();

        bus.publish(test_envelope("payment.fail_visited.v1", "42"))
            .await
            .unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("payment.fail_visited.v1"));
        assert!(!bus.has_event("payment.success_visited.v1"));
    }

    #[tokio::test]
    async fn filters_by_type_and_aggregate() {
        let bus = InProcessEventBus::with_capture();

        bus.publish(test_envelope("type.a", "1")).await.unwrap();
        bus.publish(test_envelope("type.b", "2")).await.unwrap();
        bus.publish(test_envelope("type.a", "2")).await.unwrap();

        assert_eq!(bus.events_of_type("type.a").len(), 2);
        assert_eq!(bus.events_for_aggregate("2").len(), 2);
    }

    #[tokio::test]
    async fn clear_removes_published_events() {
        let bus = InProcessEventBus::with_capture();
        bus.publish(test_envelope("type.a", "1")).await.unwrap();

        bus.clear();

        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn delivery_only_bus_retains_nothing() {
        let bus = InProcessEventBus::new();
        let handler = Arc::new(CountingHandler::new());
        bus.subscribe("type.a", handler.clone());

        for i in 0..1000 {
            bus.publish(test_envelope("type.a", &i.to_string()))
                .await
                .unwrap();
        }

        assert_eq!(handler.count(), 1000);
        assert!(!bus.is_capturing());
        assert_eq!(bus.event_count(), 0);
        assert!(bus.published_events().is_empty());
        assert!(!bus.has_event("type.a"));
    }

    // ══════════════════════════════════════════════════════════════
    // Subscription Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn subscribed_handler_receives_matching_events_only() {
        let bus = InProcessEventBus::new();
        let handler = Arc::new(CountingHandler::new());
        bus.subscribe("type.a", handler.clone());

        bus.publish(test_envelope("type.a", "1")).await.unwrap();
        bus.publish(test_envelope("type.b", "1")).await.unwrap();

        assert_eq!(handler.count(), 1);
    }

    #[tokio::test]
    async fn subscribe_all_registers_for_each_type() {
        let bus = InProcessEventBus::new();
        let handler = Arc::new(CountingHandler::new());
        bus.subscribe_all(&["type.a", "type.b"], handler.clone());

        bus.publish_all(vec![test_envelope("type.a", "1"), test_envelope("type.b", "1")])
            .await
            .unwrap();

        assert_eq!(handler.count(), 2);
    }

    #[tokio::test]
    async fn handler_failure_is_reported_after_all_handlers_ran() {
        let bus = InProcessEventBus::new();
        let counter = Arc::new(CountingHandler::new());
        bus.subscribe("type.a", Arc::new(FailingHandler));
        bus.subscribe("type.a", counter.clone());

        let result = bus.publish(test_envelope("type.a", "1")).await;

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::EventDeliveryFailed);
        assert!(err.message.contains("FailingHandler"));
        assert_eq!(counter.count(), 1);
    }
}
