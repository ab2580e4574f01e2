//! The race coordinator: many sources, one deadline, first success wins.

use crate::{FetchError, SourceAdapter};
use buscacep_types::{Address, PostalCode, RaceOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// One source's report, tagged with the adapter that produced it.
#[derive(Debug)]
struct RaceMessage {
    source: &'static str,
    result: Result<Address, FetchError>,
}

/// Race every source for `postal_code` under one overall `deadline`.
///
/// Each adapter runs as its own task and reports over a channel sized to
/// the adapter count, so no producer ever waits on the consumer. The first
/// successful report wins immediately; a failure report never ends the
/// race early - the coordinator keeps waiting on the remaining sources
/// until either all have failed (`Empty`) or the deadline fires
/// (`Timeout`). When the deadline fires, in-flight tasks are abandoned
/// rather than cancelled: they terminate on their own request timeout and
/// their late sends fail harmlessly against the dropped receiver.
///
/// When two sources succeed near-simultaneously the winner is whichever
/// report the channel delivers first. That tie-break is scheduling order,
/// not measured latency, and is intentional.
pub async fn resolve(
    postal_code: &PostalCode,
    sources: &[Arc<dyn SourceAdapter>],
    deadline: Duration,
) -> RaceOutcome {
    if sources.is_empty() {
        return RaceOutcome::Empty;
    }

    let (tx, mut rx) = mpsc::channel::<RaceMessage>(sources.len());
    for source in sources {
        let source = Arc::clone(source);
        let postal_code = postal_code.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = source.fetch(&postal_code).await;
            let message = RaceMessage {
                source: source.label(),
                result,
            };
            // Only fails once the coordinator has stopped listening.
            let _ = tx.send(message).await;
        });
    }
    // The channel must close once every task has reported, so the
    // coordinator's copy of the sender cannot outlive this scope.
    drop(tx);

    let first_success = tokio::time::timeout(deadline, async {
        while let Some(message) = rx.recv().await {
            match message.result {
                Ok(address) => {
                    tracing::debug!(source = message.source, "source won the race");
                    return Some(address);
                }
                Err(error) => {
                    tracing::warn!(
                        source = message.source,
                        %error,
                        "source failed, waiting on the rest"
                    );
                }
            }
        }
        None
    })
    .await;

    match first_success {
        Ok(Some(address)) => RaceOutcome::Success(address),
        Ok(None) => RaceOutcome::Empty,
        Err(_elapsed) => RaceOutcome::Timeout,
    }
}
