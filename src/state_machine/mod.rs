mod attempt;
mod state;

pub use attempt::{Attempt, AttemptReport, FailureSource, MonitorOutcome, MonitorSnapshot};
pub use state::{MonitorEvent, RunState, StateMachine, progress_for};
