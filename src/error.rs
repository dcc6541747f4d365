use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("{resource} does not support {operation}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Short message suitable for an inline alert.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            AppError::Network(_) => "Could not reach the server".to_string(),
            AppError::Http { status, .. } => format!("Request failed with status {}", status),
            AppError::Parse(_) => "Unexpected response from the server".to_string(),
            AppError::Unsupported { resource, operation } => {
                format!("{} cannot be used to {}", resource, operation)
            }
            AppError::UnknownResource(name) => format!("No such resource: {}", name),
            AppError::Validation(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Io(e) => format!("Could not write output: {}", e),
        }
    }
}
