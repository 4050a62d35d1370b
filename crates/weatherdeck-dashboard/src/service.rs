//! Background lookups for event-loop front ends.
//! The lookup runs on the tokio runtime; the result comes back over mpsc and
//! is applied on the loop that owns the controller.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use weatherdeck_weather::{LookupFailed, WeatherLookup, WeatherSnapshot};

use crate::controller::{DashboardController, SearchTicket};

/// Messages sent from lookup tasks back to the event loop
#[derive(Debug)]
pub enum DashboardMessage {
    LookupDone {
        ticket: SearchTicket,
        result: Result<WeatherSnapshot, LookupFailed>,
    },
}

/// Start a search and run its lookup in the background.
///
/// Returns `None` when no lookup was needed (empty query) or no runtime is
/// available; in the latter case the search fails immediately.
pub fn spawn_search(
    controller: &mut DashboardController,
    raw_query: &str,
    tx: &UnboundedSender<DashboardMessage>,
) -> Option<JoinHandle<()>> {
    let ticket = controller.begin_search(raw_query)?;

    let runtime = match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("No async runtime for weather lookup: {}", e);
            controller.complete_search(&ticket, Err(LookupFailed));
            return None;
        }
    };

    Some(runtime.spawn(run_lookup(tx.clone(), controller.lookup_service(), ticket)))
}

async fn run_lookup(
    tx: UnboundedSender<DashboardMessage>,
    lookup: Arc<dyn WeatherLookup>,
    ticket: SearchTicket,
) {
    let result = lookup.lookup(&ticket.place, ticket.unit).await;
    if tx
        .send(DashboardMessage::LookupDone { ticket, result })
        .is_err()
    {
        tracing::debug!("Event loop gone; dropping lookup result");
    }
}

/// Apply a message on the loop that owns `controller`.
///
/// Returns `true` if the view changed.
pub fn apply_message(controller: &mut DashboardController, message: DashboardMessage) -> bool {
    match message {
        DashboardMessage::LookupDone { ticket, result } => {
            controller.complete_search(&ticket, result)
        }
    }
}
