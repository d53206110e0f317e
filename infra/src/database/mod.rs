//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Repository implementations for the directory and verification links

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlAreaRepository, MySqlCountryRepository, MySqlPhoneNumberRepository,
    MySqlVerificationRepository,
};

use std::sync::Arc;

use pn_core::services::DirectoryService;

/// Directory service backed by MySQL
pub type MySqlDirectoryService = DirectoryService<
    MySqlCountryRepository,
    MySqlAreaRepository,
    MySqlPhoneNumberRepository,
    MySqlVerificationRepository,
>;

/// Build the directory service and the verification repository it shares
/// with the verification service
pub fn directory_service(
    pool: &DatabasePool,
) -> (Arc<MySqlDirectoryService>, Arc<MySqlVerificationRepository>) {
    let verification = Arc::new(MySqlVerificationRepository::new(pool.get_pool().clone()));
    let directory = DirectoryService::new(
        Arc::new(MySqlCountryRepository::new(pool.get_pool().clone())),
        Arc::new(MySqlAreaRepository::new(pool.get_pool().clone())),
        Arc::new(MySqlPhoneNumberRepository::new(pool.get_pool().clone())),
        verification.clone(),
    );
    (Arc::new(directory), verification)
}
