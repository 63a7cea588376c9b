//! Main application state management

use std::sync::Mutex;

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{CountdownState, Cycle, CycleId, CycleList, NewCycle};

/// Owns the cycle history, the active pointer, and the channels that fan
/// state changes out to the tick task and the UI loop.
#[derive(Debug)]
pub struct AppState {
    /// Cycle history and the active-cycle pointer
    cycle_list: Mutex<CycleList>,
    /// Latest published countdown snapshot
    countdown: Mutex<CountdownState>,
    /// Channel for cycle change notifications (arms and tears down the tick)
    cycle_change_tx: broadcast::Sender<Option<Cycle>>,
    /// Channel for countdown updates (drives redraw and the terminal title)
    countdown_tx: watch::Sender<CountdownState>,
    /// Keep one receiver alive to prevent channel closure
    _countdown_rx: watch::Receiver<CountdownState>,
}

impl AppState {
    pub fn new() -> Self {
        let (cycle_change_tx, _) = broadcast::channel(16);
        let (countdown_tx, countdown_rx) = watch::channel(CountdownState::idle());

        Self {
            cycle_list: Mutex::new(CycleList::default()),
            countdown: Mutex::new(CountdownState::idle()),
            cycle_change_tx,
            countdown_tx,
            _countdown_rx: countdown_rx,
        }
    }

    /// Append a validated cycle, make it active, and reset the countdown.
    pub fn start_cycle(&self, new_cycle: NewCycle) -> Result<Cycle, String> {
        let cycle = {
            let mut list = self
                .cycle_list
                .lock()
                .map_err(|e| format!("Failed to lock cycle list: {}", e))?;
            list.start_cycle(new_cycle, Utc::now())
        };

        info!(
            "Started cycle {} for task {:?} ({} min)",
            cycle.id(),
            cycle.task(),
            cycle.minutes_amount()
        );

        self.publish_countdown(CountdownState::active(cycle.id(), 0))?;
        self.notify_cycle_change(Some(cycle.clone()));

        Ok(cycle)
    }

    /// Stamp the active cycle's interrupt instant and clear the pointer.
    ///
    /// With no active cycle this only re-publishes the idle snapshot, which
    /// matches clearing an already-empty pointer.
    pub fn interrupt_active_cycle(&self) -> Result<Option<Cycle>, String> {
        let interrupted = {
            let mut list = self
                .cycle_list
                .lock()
                .map_err(|e| format!("Failed to lock cycle list: {}", e))?;
            list.interrupt_active(Utc::now())
        };

        match &interrupted {
            Some(cycle) => info!("Interrupted cycle {} for task {:?}", cycle.id(), cycle.task()),
            None => debug!("Interrupt requested with no active cycle"),
        }

        self.publish_countdown(CountdownState::idle())?;
        self.notify_cycle_change(None);

        Ok(interrupted)
    }

    /// Publish a recomputed `seconds_passed` for `cycle_id`.
    ///
    /// Updates that arrive after the cycle stopped being active are dropped,
    /// so a late tick can never resurrect a finished countdown.
    pub fn update_seconds_passed(&self, cycle_id: CycleId, seconds_passed: u64) -> Result<(), String> {
        let still_active = {
            let list = self
                .cycle_list
                .lock()
                .map_err(|e| format!("Failed to lock cycle list: {}", e))?;
            list.active_cycle_id() == Some(cycle_id)
        };

        if !still_active {
            debug!("Dropping countdown update for inactive cycle {}", cycle_id);
            return Ok(());
        }

        self.publish_countdown(CountdownState::active(cycle_id, seconds_passed))
    }

    /// Get the currently active cycle, if any.
    pub fn active_cycle(&self) -> Result<Option<Cycle>, String> {
        self.cycle_list
            .lock()
            .map(|list| list.active_cycle().cloned())
            .map_err(|e| format!("Failed to lock cycle list: {}", e))
    }

    /// Get a point-in-time copy of the whole cycle history.
    pub fn cycles_snapshot(&self) -> Result<Vec<Cycle>, String> {
        self.cycle_list
            .lock()
            .map(|list| list.cycles().to_vec())
            .map_err(|e| format!("Failed to lock cycle list: {}", e))
    }

    /// Get the latest countdown snapshot.
    pub fn countdown(&self) -> Result<CountdownState, String> {
        self.countdown
            .lock()
            .map(|countdown| countdown.clone())
            .map_err(|e| format!("Failed to lock countdown state: {}", e))
    }

    /// Subscribe to cycle change notifications.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<Option<Cycle>> {
        self.cycle_change_tx.subscribe()
    }

    /// Watch countdown snapshots as they are published.
    pub fn watch_countdown(&self) -> watch::Receiver<CountdownState> {
        self.countdown_tx.subscribe()
    }

    fn publish_countdown(&self, next: CountdownState) -> Result<(), String> {
        let mut countdown = self
            .countdown
            .lock()
            .map_err(|e| format!("Failed to lock countdown state: {}", e))?;
        *countdown = next.clone();
        drop(countdown);

        if let Err(e) = self.countdown_tx.send(next) {
            warn!("Failed to send countdown update: {}", e);
        }

        Ok(())
    }

    fn notify_cycle_change(&self, change: Option<Cycle>) {
        if let Err(e) = self.cycle_change_tx.send(change) {
            warn!("Failed to send cycle change notification: {}", e);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_cycle(task: &str, minutes: f64) -> NewCycle {
        NewCycle {
            task: task.to_string(),
            minutes_amount: minutes,
        }
    }

    #[test]
    fn test_start_cycle_appends_activates_and_resets_countdown() {
        let state = AppState::new();

        let cycle = state.start_cycle(new_cycle("Write report", 25.0)).unwrap();

        assert_eq!(state.cycles_snapshot().unwrap().len(), 1);
        assert_eq!(
            state.active_cycle().unwrap().map(|c| c.id()),
            Some(cycle.id())
        );

        let countdown = state.countdown().unwrap();
        assert_eq!(countdown.active_cycle_id, Some(cycle.id()));
        assert_eq!(countdown.seconds_passed, 0);
    }

    #[test]
    fn test_interrupt_preserves_every_other_cycle() {
        let state = AppState::new();

        let first = state.start_cycle(new_cycle("first", 5.0)).unwrap();
        state.interrupt_active_cycle().unwrap();
        let second = state.start_cycle(new_cycle("second", 10.0)).unwrap();

        let interrupted = state.interrupt_active_cycle().unwrap().unwrap();
        assert_eq!(interrupted.id(), second.id());

        let cycles = state.cycles_snapshot().unwrap();
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].id(), first.id());
        assert_eq!(cycles[0].task(), "first");
        assert!(cycles[0].is_interrupted());
        assert!(cycles[1].is_interrupted());
        assert!(state.active_cycle().unwrap().is_none());
    }

    #[test]
    fn test_interrupt_with_no_active_cycle_is_a_noop() {
        let state = AppState::new();

        assert!(state.interrupt_active_cycle().unwrap().is_none());
        assert!(state.cycles_snapshot().unwrap().is_empty());
        assert_eq!(state.countdown().unwrap(), CountdownState::idle());
    }

    #[test]
    fn test_update_seconds_passed_ignores_stale_cycles() {
        let state = AppState::new();

        let stale = state.start_cycle(new_cycle("stale", 25.0)).unwrap();
        state.interrupt_active_cycle().unwrap();

        state.update_seconds_passed(stale.id(), 10).unwrap();
        assert_eq!(state.countdown().unwrap(), CountdownState::idle());

        let live = state.start_cycle(new_cycle("live", 25.0)).unwrap();
        state.update_seconds_passed(live.id(), 65).unwrap();

        let countdown = state.countdown().unwrap();
        assert_eq!(countdown.active_cycle_id, Some(live.id()));
        assert_eq!(countdown.seconds_passed, 65);
    }

    #[test]
    fn test_watch_channel_publishes_snapshots() {
        let state = AppState::new();
        let mut countdown_rx = state.watch_countdown();

        let cycle = state.start_cycle(new_cycle("Write report", 25.0)).unwrap();

        assert!(countdown_rx.has_changed().unwrap());
        assert_eq!(
            countdown_rx.borrow_and_update().active_cycle_id,
            Some(cycle.id())
        );

        state.interrupt_active_cycle().unwrap();
        assert!(countdown_rx.has_changed().unwrap());
        assert!(countdown_rx.borrow_and_update().active_cycle_id.is_none());
    }
}
