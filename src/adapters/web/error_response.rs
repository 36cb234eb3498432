use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use error_stack::Report;
use tracing::error;

use crate::application::dashboard_service::DashboardError;

/// Turns a failed dashboard request into a 500 page. The report is logged in
/// full; the client only sees a generic message.
#[derive(Debug)]
pub struct ErrorResponse(pub Report<DashboardError>);

impl From<Report<DashboardError>> for ErrorResponse {
    fn from(report: Report<DashboardError>) -> Self {
        ErrorResponse(report)
    }
}

impl ErrorResponse {
    pub fn public_message(&self) -> &'static str {
        match self.0.current_context() {
            DashboardError::FetchRows => {
                "The manuscript spreadsheet could not be loaded. Please try again later."
            }
            DashboardError::Render => "The dashboard page could not be rendered.",
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        error!("Dashboard request failed: {:?}", self.0);
        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>Error</title></head><body><h1>500</h1><p>{}</p></body></html>\n",
            self.public_message()
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
