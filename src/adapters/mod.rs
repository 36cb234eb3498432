pub mod config;
pub mod oauth;
pub mod sheets;
pub mod web;
