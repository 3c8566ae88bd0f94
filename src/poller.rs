//! Telemetry pollers
//!
//! One task per polled widget. Each loop issues an immediate fetch on start,
//! then refetches on a fixed cadence until shutdown. Failures are swallowed
//! and logged; the next tick is the only retry. The fetch is awaited inline,
//! so a widget never has more than one request in flight.

use crate::backend::AnalysisBackend;
use crate::backend::error::BackendError;
use crate::consts::cli_consts::polling;
use crate::logging::log_fetch_failure;
use crate::updates::{UpdatePayload, Widget, WidgetUpdate};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Generic poll loop for one widget.
///
/// Runs until the shutdown broadcast fires or the UI drops the receiving end
/// of the update channel. A response resolving after either of those is
/// discarded with the failed send; it can never reach widget state.
pub async fn run_poller<F, Fut>(
    widget: Widget,
    fetch: F,
    sender: mpsc::Sender<WidgetUpdate>,
    mut shutdown: broadcast::Receiver<()>,
) where
    F: Fn() -> Fut + Send,
    Fut: Future<Output = Result<UpdatePayload, BackendError>> + Send,
{
    let mut interval = tokio::time::interval(polling::poll_interval());
    // A slow response delays the following tick instead of bursting.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut generation: u64 = 0;

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = interval.tick() => {
                generation += 1;
                let payload = match fetch().await {
                    Ok(payload) => payload,
                    Err(e) => {
                        log_fetch_failure(&format!("{widget} poll"), &e);
                        UpdatePayload::FetchFailed
                    }
                };
                let update = WidgetUpdate::new(widget, generation, payload);
                if sender.send(update).await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Spawn the three telemetry pollers. Each owns a private fetch loop and a
/// private shutdown subscription; there is no shared scheduler.
pub fn start_pollers(
    backend: Arc<dyn AnalysisBackend>,
    update_sender: mpsc::Sender<WidgetUpdate>,
    shutdown: &broadcast::Sender<()>,
) -> Vec<JoinHandle<()>> {
    let mut join_handles = Vec::new();

    // Composite risk gauge
    let stats_handle = {
        let backend = backend.clone();
        let sender = update_sender.clone();
        let shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            run_poller(
                Widget::RiskGauge,
                move || {
                    let backend = backend.clone();
                    async move { backend.dashboard_stats().await.map(UpdatePayload::Stats) }
                },
                sender,
                shutdown,
            )
            .await;
        })
    };
    join_handles.push(stats_handle);

    // Event timeline
    let events_handle = {
        let backend = backend.clone();
        let sender = update_sender.clone();
        let shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            run_poller(
                Widget::EventFeed,
                move || {
                    let backend = backend.clone();
                    async move { backend.events().await.map(UpdatePayload::Events) }
                },
                sender,
                shutdown,
            )
            .await;
        })
    };
    join_handles.push(events_handle);

    // Identity session table
    let sessions_handle = {
        let backend = backend.clone();
        let sender = update_sender.clone();
        let shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            run_poller(
                Widget::SessionTable,
                move || {
                    let backend = backend.clone();
                    async move {
                        backend
                            .identity_sessions()
                            .await
                            .map(UpdatePayload::Sessions)
                    }
                },
                sender,
                shutdown,
            )
            .await;
        })
    };
    join_handles.push(sessions_handle);

    join_handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SecurityEvent;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn sample_events() -> Vec<SecurityEvent> {
        serde_json::from_str(
            r#"[{"id": "1", "type": "info", "message": "hello", "timestamp": "now"}]"#,
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    // First fetch is immediate; later fetches advance the generation.
    async fn test_poller_fetches_immediately_then_on_cadence() {
        let (sender, mut receiver) = mpsc::channel(10);
        let (shutdown_sender, _) = broadcast::channel(1);

        let handle = tokio::spawn(run_poller(
            Widget::EventFeed,
            || async { Ok(UpdatePayload::Events(sample_events())) },
            sender,
            shutdown_sender.subscribe(),
        ));

        let first = receiver.recv().await.expect("first update");
        assert_eq!(first.generation, 1);
        assert_eq!(first.payload, UpdatePayload::Events(sample_events()));

        let second = receiver.recv().await.expect("second update");
        assert_eq!(second.generation, 2);

        let _ = shutdown_sender.send(());
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    // A failed cycle reports FetchFailed and the loop keeps polling.
    async fn test_poller_survives_fetch_failures() {
        let (sender, mut receiver) = mpsc::channel(10);
        let (shutdown_sender, _) = broadcast::channel(1);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let handle = tokio::spawn(run_poller(
            Widget::SessionTable,
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(BackendError::Http {
                            status: 503,
                            message: "unavailable".to_string(),
                        })
                    } else {
                        Ok(UpdatePayload::Sessions(Vec::new()))
                    }
                }
            },
            sender,
            shutdown_sender.subscribe(),
        ));

        let first = receiver.recv().await.expect("failure update");
        assert_eq!(first.payload, UpdatePayload::FetchFailed);

        let second = receiver.recv().await.expect("recovery update");
        assert_eq!(second.payload, UpdatePayload::Sessions(Vec::new()));
        assert_eq!(second.generation, 2);

        let _ = shutdown_sender.send(());
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    // Tearing down the UI mid-flight must not panic or deliver anywhere.
    async fn test_in_flight_response_after_unmount_is_discarded() {
        let (sender, receiver) = mpsc::channel(10);
        let (shutdown_sender, _) = broadcast::channel(1);

        let handle = tokio::spawn(run_poller(
            Widget::RiskGauge,
            || async {
                // Response still in flight when the receiver goes away.
                tokio::time::sleep(Duration::from_secs(3)).await;
                Ok(UpdatePayload::FetchFailed)
            },
            sender,
            shutdown_sender.subscribe(),
        ));

        drop(receiver);
        // The pending response resolves, the send fails, the loop exits.
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    // Shutdown is honored between ticks and is safe to signal repeatedly.
    async fn test_shutdown_stops_polling() {
        let (sender, mut receiver) = mpsc::channel(10);
        let (shutdown_sender, _) = broadcast::channel(1);

        let handle = tokio::spawn(run_poller(
            Widget::EventFeed,
            || async { Ok(UpdatePayload::Events(Vec::new())) },
            sender,
            shutdown_sender.subscribe(),
        ));

        let _ = receiver.recv().await.expect("initial update");
        let _ = shutdown_sender.send(());
        let _ = shutdown_sender.send(());
        handle.await.unwrap();

        // No further updates after the loop exits.
        assert!(receiver.recv().await.is_none());
    }
}
