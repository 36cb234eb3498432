use std::{future::Future, path::PathBuf, pin::Pin};

use google_sheets4::oauth2::authenticator_delegate::InstalledFlowDelegate;
use tokio::io::{AsyncBufReadExt, BufReader};

type CodeFuture<'a> = Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>>;

/// Prints the authorization URL on stdout and reads the code from the next
/// line of stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl InstalledFlowDelegate for ConsolePrompt {
    fn present_user_url<'a>(&'a self, url: &'a str, _need_code: bool) -> CodeFuture<'a> {
        Box::pin(read_code(url))
    }
}

async fn read_code(url: &str) -> Result<String, String> {
    println!(
        "Go to the following link in your browser then type the authorization code: \n{}",
        url
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let line = lines
        .next_line()
        .await
        .map_err(|e| format!("couldn't read authorization code: {}", e))?
        .ok_or_else(|| "stdin closed before an authorization code was entered".to_string())?;

    let code = line.trim();
    if code.is_empty() {
        return Err("empty authorization code".to_string());
    }
    Ok(code.to_owned())
}

/// Never prompts. The server uses this so a request cannot wait on stdin;
/// the operator runs `authorize` instead.
#[derive(Debug, Clone)]
pub struct RequirePriorAuthorization {
    token_path: PathBuf,
}

impl RequirePriorAuthorization {
    pub fn new(token_path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: token_path.into(),
        }
    }
}

impl InstalledFlowDelegate for RequirePriorAuthorization {
    fn present_user_url<'a>(&'a self, _url: &'a str, _need_code: bool) -> CodeFuture<'a> {
        let message = format!(
            "no usable token in '{}', run `manuscript-tracker authorize` first",
            self.token_path.display()
        );
        Box::pin(std::future::ready(Err(message)))
    }
}

/// Sends the redirect URI registered for the client instead of the
/// out-of-band default, leaving the prompt to `inner`.
#[derive(Debug, Clone)]
pub struct WithRedirect<D> {
    pub inner: D,
    pub redirect_uri: String,
}

impl<D: InstalledFlowDelegate> InstalledFlowDelegate for WithRedirect<D> {
    fn redirect_uri(&self) -> Option<&str> {
        Some(&self.redirect_uri)
    }

    fn present_user_url<'a>(&'a self, url: &'a str, need_code: bool) -> CodeFuture<'a> {
        self.inner.present_user_url(url, need_code)
    }
}
