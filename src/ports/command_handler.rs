use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
    #[error("Command execution failed: {details}")]
    ExecutionFailed { details: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the dashboard over HTTP.
    Serve,
    /// Obtain and persist a token, prompting for an authorization code if needed.
    Authorize,
    /// Fetch and classify once, logging the counts.
    Summary,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Command, CommandError> {
        match args.get(1).map(|s| s.as_str()) {
            None | Some("serve") => Ok(Command::Serve),
            Some("authorize") => Ok(Command::Authorize),
            Some("summary") => Ok(Command::Summary),
            Some(other) => Err(CommandError::InvalidCommand {
                details: format!(
                    "unknown command '{}', expected one of: serve, authorize, summary",
                    other
                ),
            }),
        }
    }
}

#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_defaults_to_serve() {
        assert_eq!(Command::parse(&args(&["manuscript-tracker"])).unwrap(), Command::Serve);
    }

    #[test]
    fn test_parses_known_commands() {
        assert_eq!(
            Command::parse(&args(&["bin", "authorize"])).unwrap(),
            Command::Authorize
        );
        assert_eq!(
            Command::parse(&args(&["bin", "summary"])).unwrap(),
            Command::Summary
        );
        assert_eq!(Command::parse(&args(&["bin", "serve"])).unwrap(), Command::Serve);
    }

    #[test]
    fn test_rejects_unknown_command() {
        let err = Command::parse(&args(&["bin", "publish"])).unwrap_err();
        assert!(matches!(err, CommandError::InvalidCommand { .. }));
        assert!(err.to_string().contains("publish"));
    }
}
