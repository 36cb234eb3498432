pub mod classifier;
pub mod dashboard_service;
