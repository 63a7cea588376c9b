//! Countdown tick background task

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::state::{AppState, Cycle};

/// Background task that drives the one-second tick while a cycle is active.
///
/// The task idles on the cycle change channel. When a cycle becomes active it
/// arms a one-second interval; every tick recomputes `seconds_passed` from
/// the cycle's absolute start instant, so a delayed or dropped tick corrects
/// itself on the next one. The interval is torn down the moment a change
/// notification reports the cycle gone, which keeps at most one tick source
/// live.
pub async fn countdown_timer_task(state: Arc<AppState>) {
    info!("Starting countdown timer task");

    let mut change_rx = state.subscribe_changes();
    let mut pending: Option<Option<Cycle>> = None;

    loop {
        let change = match pending.take() {
            Some(change) => change,
            None => match change_rx.recv().await {
                Ok(change) => change,
                Err(RecvError::Lagged(missed)) => {
                    warn!("Cycle change channel lagged by {} messages, resyncing", missed);
                    match state.active_cycle() {
                        Ok(active) => active,
                        Err(e) => {
                            warn!("Failed to resync active cycle: {}", e);
                            continue;
                        }
                    }
                }
                Err(RecvError::Closed) => break,
            },
        };

        let Some(active) = change else {
            debug!("No active cycle, countdown tick idle");
            continue;
        };

        info!(
            "Arming one-second tick for cycle {} ({} min)",
            active.id(),
            active.minutes_amount()
        );
        let mut interval = tokio::time::interval(Duration::from_secs(1));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let elapsed = Utc::now() - active.start_date();
                    let seconds_passed = elapsed.num_seconds().max(0) as u64;

                    if let Err(e) = state.update_seconds_passed(active.id(), seconds_passed) {
                        warn!("Failed to publish countdown update: {}", e);
                    }
                }
                next = change_rx.recv() => {
                    match next {
                        Ok(change) if change.as_ref().map(Cycle::id) == Some(active.id()) => {
                            // Same cycle re-announced, keep ticking from its start instant.
                        }
                        Ok(change) => {
                            info!("Cycle {} is no longer active, tearing down tick", active.id());
                            pending = Some(change);
                            break;
                        }
                        Err(RecvError::Lagged(missed)) => {
                            warn!("Cycle change channel lagged by {} messages, resyncing", missed);
                            match state.active_cycle() {
                                Ok(current) => {
                                    if current.as_ref().map(Cycle::id) != Some(active.id()) {
                                        pending = Some(current);
                                        break;
                                    }
                                }
                                Err(e) => warn!("Failed to resync active cycle: {}", e),
                            }
                        }
                        Err(RecvError::Closed) => {
                            debug!("Cycle change channel closed, stopping countdown tick");
                            return;
                        }
                    }
                }
            }
        }
    }

    debug!("Countdown timer task stopped");
}
