use std::path::PathBuf;

use crate::domain::stage::PromotionDirection;
use crate::error::{AppError, AppResult};

pub const JIRA_TOKEN_ENV: &str = "JIRA_TOKEN";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jira_base_url: String,
    pub jira_token: String,
    pub direction: PromotionDirection,
    pub metadata_file: PathBuf,
    pub dry_run: bool,
}

impl AppConfig {
    /// Validates the invocation parameters before any file or network
    /// activity. The token comes from the `JIRA_TOKEN` environment variable;
    /// the caller passes the raw lookup result so this stays testable.
    pub fn new(
        jira_base_url: String,
        promotion_type: &str,
        jira_token: Option<String>,
        metadata_file: PathBuf,
        dry_run: bool,
    ) -> AppResult<Self> {
        let jira_token = jira_token.filter(|token| !token.is_empty()).ok_or_else(|| {
            AppError::Configuration(format!("'{JIRA_TOKEN_ENV}' is not set as env variable"))
        })?;
        let direction = PromotionDirection::parse(promotion_type)?;

        Ok(Self {
            jira_base_url,
            jira_token,
            direction,
            metadata_file,
            dry_run,
        })
    }
}
