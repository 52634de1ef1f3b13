pub mod assignment;
pub mod backup;
pub mod employee;
pub mod provider;
pub mod service_account;
pub mod stats;
