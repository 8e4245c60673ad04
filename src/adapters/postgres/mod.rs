//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresNotificationRepository` - Result notifications for strict check
//! - `run_migrations` - Applies the embedded schema

mod notification_repository;

pub use notification_repository::{run_migrations, PostgresNotificationRepository};
