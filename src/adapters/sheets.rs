pub mod http_client;
pub mod spreadsheet_manager;
