use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("HTTP error calling JIRA API {status} url: {endpoint} message: {body}")]
    Service {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("failed to call JIRA API url: {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },
    #[error("failed to parse JSON response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

pub type AppResult<T> = Result<T, AppError>;
