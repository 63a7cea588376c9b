//! Cycle records and the append-only cycle list

use std::fmt;

use chrono::{DateTime, Utc};

/// Opaque unique token identifying a cycle.
///
/// Derived from the creation-time timestamp in milliseconds, bumped by one
/// whenever two cycles would otherwise share a millisecond. Uniqueness is the
/// only property callers may rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleId(i64);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated input for a new cycle, produced by the task form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCycle {
    pub task: String,
    pub minutes_amount: f64,
}

/// One timer run, from submission to interruption.
///
/// Everything but `interrupt_date` is immutable after construction;
/// `interrupt_date` is set at most once, through [`CycleList::interrupt_active`].
#[derive(Debug, Clone)]
pub struct Cycle {
    id: CycleId,
    task: String,
    minutes_amount: f64,
    start_date: DateTime<Utc>,
    interrupt_date: Option<DateTime<Utc>>,
}

impl Cycle {
    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn minutes_amount(&self) -> f64 {
        self.minutes_amount
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn interrupt_date(&self) -> Option<DateTime<Utc>> {
        self.interrupt_date
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt_date.is_some()
    }

    /// Total countdown duration in whole seconds.
    pub fn total_seconds(&self) -> u64 {
        (self.minutes_amount * 60.0).round() as u64
    }
}

/// Append-only history of cycles plus the pointer to the one counting down.
///
/// Cycles are never removed; interrupting amends the record and clears the
/// pointer, nothing else is ever mutated.
#[derive(Debug, Clone, Default)]
pub struct CycleList {
    cycles: Vec<Cycle>,
    active_cycle_id: Option<CycleId>,
}

impl CycleList {
    /// Append a new cycle starting at `start` and make it the active one.
    pub fn start_cycle(&mut self, new_cycle: NewCycle, start: DateTime<Utc>) -> Cycle {
        let id = self.next_id(start);
        let cycle = Cycle {
            id,
            task: new_cycle.task,
            minutes_amount: new_cycle.minutes_amount,
            start_date: start,
            interrupt_date: None,
        };

        self.cycles.push(cycle.clone());
        self.active_cycle_id = Some(id);
        cycle
    }

    /// Stamp the active cycle with an interrupt instant and clear the pointer.
    ///
    /// Returns the amended cycle, or `None` when no cycle was active (the
    /// pointer is cleared either way, the list is untouched).
    pub fn interrupt_active(&mut self, at: DateTime<Utc>) -> Option<Cycle> {
        let active_id = self.active_cycle_id.take()?;
        let cycle = self.cycles.iter_mut().find(|c| c.id == active_id)?;
        if cycle.interrupt_date.is_none() {
            cycle.interrupt_date = Some(at);
        }
        Some(cycle.clone())
    }

    pub fn active_cycle_id(&self) -> Option<CycleId> {
        self.active_cycle_id
    }

    pub fn active_cycle(&self) -> Option<&Cycle> {
        let active_id = self.active_cycle_id?;
        self.cycles.iter().find(|c| c.id == active_id)
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    fn next_id(&self, start: DateTime<Utc>) -> CycleId {
        let millis = start.timestamp_millis();
        match self.cycles.last() {
            Some(last) if last.id.0 >= millis => CycleId(last.id.0 + 1),
            _ => CycleId(millis),
        }
    }
}
