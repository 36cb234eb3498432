use google_sheets4::{hyper, hyper_rustls};

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpsClient = hyper::Client<HttpsConnector>;

/// Client shared by the spreadsheet hub and the OAuth2 authenticator. Fails
/// when the platform has no root certificates.
pub fn http_client() -> std::io::Result<HttpsClient> {
    Ok(hyper::Client::builder().build(
        hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build(),
    ))
}
