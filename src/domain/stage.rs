use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Development,
    Staging,
    Production,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Development => "development",
            Stage::Staging => "staging",
            Stage::Production => "production",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "development" => Some(Stage::Development),
            "staging" => Some(Stage::Staging),
            "production" => Some(Stage::Production),
            _ => None,
        }
    }
}

/// The (source, destination) stage pair driving label changes and comment
/// wording. Only the two promotions of the release process are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionDirection {
    pub source: Stage,
    pub destination: Stage,
}

impl PromotionDirection {
    pub fn parse(token: &str) -> AppResult<Self> {
        let parts: Vec<&str> = token.split("-to-").collect();
        if parts.len() != 2 {
            return Err(AppError::Configuration(format!(
                "invalid promotion type '{token}', expected <source>-to-<destination>"
            )));
        }

        let source = Stage::from_str(parts[0]).ok_or_else(|| {
            AppError::Configuration(format!(
                "unknown stage '{}' in promotion type '{token}'",
                parts[0]
            ))
        })?;
        let destination = Stage::from_str(parts[1]).ok_or_else(|| {
            AppError::Configuration(format!(
                "unknown stage '{}' in promotion type '{token}'",
                parts[1]
            ))
        })?;

        match (source, destination) {
            (Stage::Development, Stage::Staging) | (Stage::Staging, Stage::Production) => {
                Ok(Self {
                    source,
                    destination,
                })
            }
            _ => Err(AppError::Configuration(format!(
                "unsupported promotion type '{token}', expected development-to-staging \
                 or staging-to-production"
            ))),
        }
    }
}
