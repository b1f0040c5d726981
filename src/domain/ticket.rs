use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::warn;

pub const CLOSED_STATUS: &str = "closed";
pub const RELEASE_PENDING_STATUS: &str = "release pending";

static RELEASE_TICKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RELEASE-\d+").expect("release ticket pattern"));
static NON_RELEASE_TICKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+-\d+").expect("non-release ticket pattern"));

/// One entry of the ticket metadata batch.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketRef {
    #[serde(rename = "ticket")]
    pub key: String,
    #[serde(default)]
    pub pr_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketCategory {
    Release,
    NonRelease,
    Invalid,
}

impl TicketCategory {
    /// The release pattern wins over the generic one for keys matching both.
    pub fn of(key: &str) -> Self {
        if RELEASE_TICKET_PATTERN.is_match(key) {
            TicketCategory::Release
        } else if NON_RELEASE_TICKET_PATTERN.is_match(key) {
            TicketCategory::NonRelease
        } else {
            TicketCategory::Invalid
        }
    }
}

/// Splits a batch into release and non-release tickets, preserving input
/// order within each group. Keys matching neither pattern are dropped with
/// a warning.
pub fn classify(batch: Vec<TicketRef>) -> (Vec<TicketRef>, Vec<TicketRef>) {
    let mut release = Vec::new();
    let mut nonrelease = Vec::new();

    for ticket in batch {
        match TicketCategory::of(&ticket.key) {
            TicketCategory::Release => release.push(ticket),
            TicketCategory::NonRelease => nonrelease.push(ticket),
            TicketCategory::Invalid => {
                warn!(
                    "Ticket {} does not match expected patterns, skipping",
                    ticket.key
                );
            }
        }
    }

    (release, nonrelease)
}

/// Remote state of a ticket, fetched fresh for every run.
#[derive(Debug, Clone, Default)]
pub struct RemoteTicket {
    pub status: String,
    pub labels: Vec<String>,
}

impl RemoteTicket {
    pub fn is_closed(&self) -> bool {
        self.status.eq_ignore_ascii_case(CLOSED_STATUS)
    }

    pub fn is_release_pending(&self) -> bool {
        self.status.eq_ignore_ascii_case(RELEASE_PENDING_STATUS)
    }

    /// Labels are matched exactly, unlike statuses.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|candidate| candidate == label)
    }
}
