use async_trait::async_trait;

use crate::domain::ticket::RemoteTicket;
use crate::error::AppResult;

/// The ticket-service operations the promotion engine consumes.
///
/// Implementations own transport concerns such as retries and dry-run
/// suppression; callers treat every method as a blocking remote call.
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn fetch_ticket(&self, key: &str) -> AppResult<RemoteTicket>;
    async fn update_labels(&self, key: &str, remove: &str, add: &str) -> AppResult<()>;
    async fn add_comment(&self, key: &str, body: &str) -> AppResult<()>;
}
