pub mod error_response;
pub mod page_renderer;
pub mod router;
