//! End-to-end flow over the state layer: form submission, countdown tick
//! task lifecycle, and interruption.

use std::sync::Arc;
use std::time::Duration;

use focus_timer::form::NewCycleForm;
use focus_timer::state::{AppState, CountdownDisplay, CountdownState};
use focus_timer::tasks::countdown_timer_task;

fn filled_form(task: &str, minutes: &str) -> NewCycleForm {
    let mut form = NewCycleForm::new(Vec::new());
    for c in task.chars() {
        form.insert_char(c);
    }
    form.focus_next();
    for c in minutes.chars() {
        form.insert_char(c);
    }
    form
}

#[test]
fn submit_tick_and_interrupt_drive_the_displayed_countdown() {
    let state = AppState::new();

    let mut form = filled_form("Write report", "25");
    let new_cycle = form.submit().expect("valid form should submit");
    let cycle = state.start_cycle(new_cycle).unwrap();

    // Fresh cycle: full duration on screen.
    let countdown = state.countdown().unwrap();
    let display = CountdownDisplay::derive(Some(&cycle), countdown.seconds_passed);
    assert_eq!(display.clock(), "25:00");

    // 65 simulated seconds into the cycle.
    state.update_seconds_passed(cycle.id(), 65).unwrap();
    let countdown = state.countdown().unwrap();
    let display = CountdownDisplay::derive(Some(&cycle), countdown.seconds_passed);
    assert_eq!(display.clock(), "23:55");

    // Interrupt: record is stamped, pointer cleared, display back to zero.
    let interrupted = state.interrupt_active_cycle().unwrap().unwrap();
    assert_eq!(interrupted.id(), cycle.id());
    assert!(interrupted.interrupt_date().is_some());
    assert!(state.active_cycle().unwrap().is_none());

    let countdown = state.countdown().unwrap();
    let active = state.active_cycle().unwrap();
    let display = CountdownDisplay::derive(active.as_ref(), countdown.seconds_passed);
    assert_eq!(display.clock(), "00:00");

    // The record survives in the history list.
    let cycles = state.cycles_snapshot().unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].task(), "Write report");
}

#[test]
fn rejected_submission_leaves_state_untouched() {
    let state = AppState::new();

    let mut form = filled_form("", "25");
    assert!(form.submit().is_none());

    assert!(state.cycles_snapshot().unwrap().is_empty());
    assert!(state.active_cycle().unwrap().is_none());
    assert_eq!(state.countdown().unwrap(), CountdownState::idle());
}

#[tokio::test(start_paused = true)]
async fn tick_task_publishes_active_then_idle_snapshots() {
    let state = Arc::new(AppState::new());
    let mut countdown_rx = state.watch_countdown();

    tokio::spawn(countdown_timer_task(Arc::clone(&state)));
    // Let the task subscribe before the first notification goes out.
    tokio::task::yield_now().await;

    let mut form = filled_form("Write report", "25");
    let cycle = state.start_cycle(form.submit().unwrap()).unwrap();

    // An active snapshot for the new cycle arrives, starting from zero.
    let active_snapshot = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            countdown_rx.changed().await.unwrap();
            let snapshot = countdown_rx.borrow_and_update().clone();
            if snapshot.active_cycle_id == Some(cycle.id()) {
                return snapshot;
            }
        }
    })
    .await
    .expect("tick task should publish an active snapshot");
    assert_eq!(active_snapshot.seconds_passed, 0);

    state.interrupt_active_cycle().unwrap();

    // The tick is torn down and the idle snapshot wins.
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            countdown_rx.changed().await.unwrap();
            if countdown_rx.borrow_and_update().active_cycle_id.is_none() {
                return;
            }
        }
    })
    .await
    .expect("interrupt should publish an idle snapshot");

    assert!(state.active_cycle().unwrap().is_none());
    let cycles = state.cycles_snapshot().unwrap();
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].is_interrupted());
}
