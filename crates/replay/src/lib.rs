//! Headless storefront driver.
//!
//! Replays a JSON list of shopper actions against a fresh session over the
//! archive catalog and reports the resulting view. Rejected actions are
//! logged and skipped, the way a UI would ignore an impossible click.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use archiv_catalog::{Catalog, archive_catalog};
use archiv_events::{Event, EventBus, InMemoryEventBus, execute_and_publish};
use archiv_storefront::{StorefrontCommand, StorefrontEvent, StorefrontSession, StorefrontView};

/// A command the session refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Position in the script (0-based).
    pub index: usize,
    pub error: String,
}

/// Result of one replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayOutcome {
    /// Event types applied, in order.
    pub applied: Vec<String>,
    pub rejected: Vec<Rejection>,
    pub view: StorefrontView,
}

/// Parse a script: a JSON array of commands.
pub fn parse_script(json: &str) -> anyhow::Result<Vec<StorefrontCommand>> {
    serde_json::from_str(json).context("script is not a JSON array of storefront commands")
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<StorefrontCommand>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&raw).with_context(|| format!("failed to parse script {}", path.display()))
}

/// Run `commands` against a new session over `catalog`.
pub fn replay(catalog: Arc<Catalog>, commands: &[StorefrontCommand]) -> ReplayOutcome {
    let bus: InMemoryEventBus<StorefrontEvent> = InMemoryEventBus::new();
    let log = bus.subscribe();
    let mut session = StorefrontSession::new(catalog);

    let span = tracing::info_span!("replay", session = %session.id_typed());
    let _guard = span.enter();

    let mut rejected = Vec::new();
    for (index, command) in commands.iter().enumerate() {
        match execute_and_publish(&mut session, command, &bus) {
            Ok(events) if events.is_empty() => {
                tracing::debug!(index, "command changed nothing");
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(index, %error, "command rejected");
                rejected.push(Rejection {
                    index,
                    error: error.to_string(),
                });
            }
        }
    }

    let applied = log
        .drain()
        .iter()
        .map(|event| event.event_type().to_string())
        .collect();

    tracing::info!(
        commands = commands.len(),
        rejected = rejected.len(),
        cart_total = session.cart_total().amount(),
        "replay finished"
    );

    ReplayOutcome {
        applied,
        rejected,
        view: session.snapshot(),
    }
}

/// Replay over the built-in archive catalog.
pub fn replay_archive(commands: &[StorefrontCommand]) -> anyhow::Result<ReplayOutcome> {
    let catalog = archive_catalog().context("built-in catalog is invalid")?;
    Ok(replay(Arc::new(catalog), commands))
}
