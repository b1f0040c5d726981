//! The promotion engine: classifies a ticket batch and applies per-ticket
//! transitions against the issue tracker.

use tracing::info;

use crate::context::AppContext;
use crate::domain::stage::PromotionDirection;
use crate::domain::ticket::{TicketRef, classify};
use crate::error::AppResult;
use crate::services::IssueTrackerService;

fn compose_comment(direction: &PromotionDirection, pr_url: Option<&str>) -> String {
    let source = direction.source.as_str();
    let destination = direction.destination.as_str();
    match pr_url {
        Some(url) => format!(
            "The PR linked to this ticket has been promoted from {source} to {destination} \
             in the release-service-catalog repository. PR: {url}"
        ),
        None => format!(
            "The ticket has been promoted from {source} to {destination} in the \
             release-service-catalog repository."
        ),
    }
}

/// Promotes a single RELEASE ticket.
///
/// Closed tickets are skipped outright. Tickets that are not in release
/// pending state, or that lack the source label, only get a comment. The
/// label change runs before the comment; if it fails the comment is never
/// attempted.
pub async fn process_release(
    tracker: &dyn IssueTrackerService,
    ticket: &TicketRef,
    direction: &PromotionDirection,
) -> AppResult<()> {
    let key = &ticket.key;
    let remote = tracker.fetch_ticket(key).await?;

    if remote.is_closed() {
        info!("Skipping {key} since it is closed");
        return Ok(());
    }

    if !remote.is_release_pending() {
        info!(
            "Skipping {key} label change since it is not in release pending state. \
             A comment will be added instead."
        );
        tracker
            .add_comment(key, &compose_comment(direction, ticket.pr_url.as_deref()))
            .await?;
        return Ok(());
    }

    let source = direction.source.as_str();
    if !remote.has_label(source) {
        info!(
            "Skipping {key} label change since {source} label not found. \
             A comment will be added instead."
        );
        tracker
            .add_comment(key, &compose_comment(direction, ticket.pr_url.as_deref()))
            .await?;
        return Ok(());
    }

    tracker
        .update_labels(key, source, direction.destination.as_str())
        .await?;
    tracker
        .add_comment(key, &compose_comment(direction, ticket.pr_url.as_deref()))
        .await?;
    Ok(())
}

/// Non-RELEASE tickets never get a label change, only a comment, and only
/// while they are still open.
pub async fn process_non_release(
    tracker: &dyn IssueTrackerService,
    ticket: &TicketRef,
    direction: &PromotionDirection,
) -> AppResult<()> {
    let key = &ticket.key;
    let remote = tracker.fetch_ticket(key).await?;

    if remote.is_closed() {
        info!("Skipping {key} since it is closed");
        return Ok(());
    }

    tracker
        .add_comment(key, &compose_comment(direction, ticket.pr_url.as_deref()))
        .await?;
    Ok(())
}

/// Runs the whole batch: release tickets first, then non-release tickets,
/// each group in input order. The first per-ticket failure aborts the run.
pub async fn run(ctx: &AppContext, tickets: Vec<TicketRef>) -> AppResult<()> {
    let direction = &ctx.config.direction;
    let tracker = ctx.issue_tracker.as_ref();
    let (release, nonrelease) = classify(tickets);

    if release.is_empty() && nonrelease.is_empty() {
        info!("No tickets found in tickets metadata, skipping.");
        return Ok(());
    }

    if release.is_empty() {
        info!("No RELEASE tickets found in tickets, skipping.");
    } else {
        let keys: Vec<&str> = release.iter().map(|t| t.key.as_str()).collect();
        info!("Found {} RELEASE tickets: {keys:?}", release.len());
        for ticket in &release {
            process_release(tracker, ticket, direction).await?;
        }
    }

    if nonrelease.is_empty() {
        info!("No non-RELEASE tickets found in tickets, skipping.");
    } else {
        let keys: Vec<&str> = nonrelease.iter().map(|t| t.key.as_str()).collect();
        info!("Found {} non-RELEASE tickets: {keys:?}", nonrelease.len());
        for ticket in &nonrelease {
            process_non_release(tracker, ticket, direction).await?;
        }
    }

    Ok(())
}
