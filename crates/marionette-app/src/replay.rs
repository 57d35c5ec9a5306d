//! Feeding inbound native messages from stdin into the tree.

use marionette_common::Result;
use marionette_widgets::{NativeMessage, WidgetTree};
use tokio::io::AsyncBufReadExt;
use tracing::{info, warn};

use crate::demo::Counter;

/// Read `NativeMessage` JSON lines from stdin until EOF.
///
/// Malformed lines and messages for unknown objects are logged and skipped.
/// The bridge is flushed after every message so responses appear promptly.
pub async fn run(tree: &mut WidgetTree, mut counter: Option<Counter>) -> Result<()> {
    let reader = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = reader.lines();
    let mut delivered = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let message = match NativeMessage::from_json(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("skipping malformed native message: {e}");
                continue;
            }
        };
        if let Err(e) = tree.receive(message) {
            warn!("native message not delivered: {e}");
            continue;
        }
        delivered += 1;

        if let Some(counter) = counter.as_mut() {
            counter.drain_events(tree)?;
        }
        tree.bridge_mut().flush()?;
    }

    info!(delivered, "replay finished");
    Ok(())
}
