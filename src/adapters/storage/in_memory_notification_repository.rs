//! In-Memory Notification Repository
//!
//! Keeps result notifications in process memory. Used when no database is
//! configured and in tests. Contents are lost on restart, so strict check
//! only covers notifications received by the running process.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{InvoiceId, NotificationRecord};
use crate::ports::NotificationRepository;

/// In-memory storage for result notifications
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    records: Arc<RwLock<Vec<NotificationRecord>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored records, oldest first
    pub async fn records(&self) -> Vec<NotificationRecord> {
        self.records.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn record(&self, record: &NotificationRecord) -> Result<(), DomainError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn exists(&self, invoice_id: InvoiceId) -> Result<bool, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .any(|r| r.invoice_id == invoice_id))
    }
}
