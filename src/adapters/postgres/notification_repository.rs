//! PostgreSQL implementation of NotificationRepository.
//!
//! Rows live in `success_notifications`; the schema ships with the crate as
//! an embedded migration (see [`run_migrations`]).

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::{InvoiceId, NotificationRecord};
use crate::ports::NotificationRepository;

/// PostgreSQL implementation of the NotificationRepository port.
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}

fn invoice_to_db(invoice_id: InvoiceId) -> Result<i64, DomainError> {
    i64::try_from(invoice_id.value()).map_err(|_| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("Invoice {} exceeds the storable range", invoice_id),
        )
    })
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn record(&self, record: &NotificationRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO success_notifications (inv_id, out_sum, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(invoice_to_db(record.invoice_id)?)
        .bind(&record.out_sum)
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to record notification: {}", e))
                .with_detail("inv_id", record.invoice_id.to_string())
        })?;

        Ok(())
    }

    async fn exists(&self, invoice_id: InvoiceId) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM success_notifications WHERE inv_id = $1)
            "#,
        )
        .bind(invoice_to_db(invoice_id)?)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query notifications: {}", e)))?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_within_range_converts() {
        assert_eq!(invoice_to_db(InvoiceId::new(42)).unwrap(), 42);
    }

    #[test]
    fn invoice_beyond_i64_is_rejected() {
        let err = invoice_to_db(InvoiceId::new(u64::MAX)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
