use std::fs;
use std::path::Path;

use crate::domain::ticket::TicketRef;
use crate::error::{AppError, AppResult};

/// Loads the ticket batch from a JSON metadata file.
///
/// The file must hold an array of objects, each with a `ticket` key and an
/// optional `pr_url`. Any deviation is a configuration error raised before
/// processing starts.
pub fn load_tickets(path: &Path) -> AppResult<Vec<TicketRef>> {
    let contents = fs::read_to_string(path).map_err(|err| {
        AppError::Configuration(format!("failed to read file {}: {err}", path.display()))
    })?;

    serde_json::from_str(&contents).map_err(|err| {
        AppError::Configuration(format!("invalid JSON in file {}: {err}", path.display()))
    })
}
