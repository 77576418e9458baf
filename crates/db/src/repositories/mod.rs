//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` as the first argument. All methods return
//! [`StoreError`](crate::StoreError) on failure.

pub mod endpoint_repo;
pub mod lineage_repo;
pub mod log_repo;
pub mod notification_repo;
pub mod settings_repo;
pub mod user_repo;

pub use endpoint_repo::EndpointRepo;
pub use lineage_repo::LineageRepo;
pub use log_repo::LogRepo;
pub use notification_repo::NotificationRepo;
pub use settings_repo::SettingsRepo;
pub use user_repo::UserRepo;
