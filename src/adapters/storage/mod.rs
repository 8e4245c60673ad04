//! Storage Adapters
//!
//! In-process implementations of the storage ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryNotificationRepository** - Result notifications in memory
//!   (no database configured, testing)

mod in_memory_notification_repository;

pub use in_memory_notification_repository::InMemoryNotificationRepository;
