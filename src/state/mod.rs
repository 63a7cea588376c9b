//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod countdown;
pub mod cycle;

// Re-export main types
pub use app_state::AppState;
pub use countdown::{CountdownDisplay, CountdownState};
pub use cycle::{Cycle, CycleId, CycleList, NewCycle};
