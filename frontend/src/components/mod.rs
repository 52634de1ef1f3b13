pub mod assignments;
pub mod backups;
pub mod dashboard;
pub mod employees;
pub mod import_wizard;
pub mod providers;
pub mod service_accounts;
