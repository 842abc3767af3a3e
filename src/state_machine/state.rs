use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::GenerationStatus;

/// The run states of one monitored generation attempt.
///
/// Each attempt flows through: IDLE → SUBMITTING → POLLING → one of the four
/// terminal states (COMPLETED, FAILED, TIMED_OUT, CANCELLED).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Submitting,
    Polling,
    Completed,
    Failed,
    TimedOut,
    Cancelled,
}

impl RunState {
    /// `true` once the attempt can no longer transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::Failed | RunState::TimedOut | RunState::Cancelled
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "IDLE"),
            RunState::Submitting => write!(f, "SUBMITTING"),
            RunState::Polling => write!(f, "POLLING"),
            RunState::Completed => write!(f, "COMPLETED"),
            RunState::Failed => write!(f, "FAILED"),
            RunState::TimedOut => write!(f, "TIMED_OUT"),
            RunState::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Everything that can happen to a monitored attempt.
///
/// Produced by the effect runner (timer fires, transport completions,
/// user cancellation) and fed through [`StateMachine::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// The attempt started and the create call is in flight.
    SubmitIssued,
    /// The backend accepted the job.
    CreateSucceeded { job_id: u64 },
    /// The create call failed at the transport layer.
    CreateFailed,
    /// A poll resolved with the job's current status.
    PollReturned(GenerationStatus),
    /// A poll call itself failed at the transport layer.
    PollFailed,
    /// The global deadline elapsed before the job reached a terminal status.
    DeadlineElapsed,
    /// The user asked to stop watching this attempt.
    CancelRequested,
}

/// Maps a backend job status to the user-visible progress estimate.
pub fn progress_for(status: GenerationStatus) -> u8 {
    match status {
        GenerationStatus::Pending => 10,
        GenerationStatus::Processing => 50,
        GenerationStatus::Completed => 100,
        GenerationStatus::Failed => 0,
    }
}

/// The pure transition function for the monitor state machine.
pub struct StateMachine;

impl StateMachine {
    /// Compute the state an event leads to, or `None` when the event does
    /// not apply in the current state.
    ///
    /// `None` is how stale completions are discarded: a poll result or
    /// deadline fire that arrives after cancellation (or after any terminal
    /// transition) finds the machine outside `Polling` and produces no
    /// transition. Terminal states accept no event at all.
    pub fn next(state: RunState, event: &MonitorEvent) -> Option<RunState> {
        match (state, event) {
            (RunState::Idle, MonitorEvent::SubmitIssued) => Some(RunState::Submitting),

            (RunState::Submitting, MonitorEvent::CreateSucceeded { .. }) => Some(RunState::Polling),
            (RunState::Submitting, MonitorEvent::CreateFailed) => Some(RunState::Failed),
            (RunState::Submitting, MonitorEvent::DeadlineElapsed) => Some(RunState::TimedOut),
            (RunState::Submitting, MonitorEvent::CancelRequested) => Some(RunState::Cancelled),

            (RunState::Polling, MonitorEvent::PollReturned(status)) => Some(match status {
                GenerationStatus::Pending | GenerationStatus::Processing => RunState::Polling,
                GenerationStatus::Completed => RunState::Completed,
                GenerationStatus::Failed => RunState::Failed,
            }),
            (RunState::Polling, MonitorEvent::PollFailed) => Some(RunState::Failed),
            (RunState::Polling, MonitorEvent::DeadlineElapsed) => Some(RunState::TimedOut),
            (RunState::Polling, MonitorEvent::CancelRequested) => Some(RunState::Cancelled),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERMINALS: [RunState; 4] = [
        RunState::Completed,
        RunState::Failed,
        RunState::TimedOut,
        RunState::Cancelled,
    ];

    #[test]
    fn happy_path_walks_to_completed() {
        let s = StateMachine::next(RunState::Idle, &MonitorEvent::SubmitIssued).unwrap();
        assert_eq!(s, RunState::Submitting);

        let s = StateMachine::next(s, &MonitorEvent::CreateSucceeded { job_id: 7 }).unwrap();
        assert_eq!(s, RunState::Polling);

        let s =
            StateMachine::next(s, &MonitorEvent::PollReturned(GenerationStatus::Pending)).unwrap();
        assert_eq!(s, RunState::Polling);

        let s = StateMachine::next(s, &MonitorEvent::PollReturned(GenerationStatus::Processing))
            .unwrap();
        assert_eq!(s, RunState::Polling);

        let s = StateMachine::next(s, &MonitorEvent::PollReturned(GenerationStatus::Completed))
            .unwrap();
        assert_eq!(s, RunState::Completed);
        assert!(s.is_terminal());
    }

    #[test]
    fn create_failure_terminates_before_any_poll() {
        let s = StateMachine::next(RunState::Submitting, &MonitorEvent::CreateFailed).unwrap();
        assert_eq!(s, RunState::Failed);
    }

    #[test]
    fn remote_failure_terminates_polling() {
        let s = StateMachine::next(
            RunState::Polling,
            &MonitorEvent::PollReturned(GenerationStatus::Failed),
        )
        .unwrap();
        assert_eq!(s, RunState::Failed);
    }

    #[test]
    fn poll_transport_failure_is_fatal() {
        let s = StateMachine::next(RunState::Polling, &MonitorEvent::PollFailed).unwrap();
        assert_eq!(s, RunState::Failed);
    }

    #[test]
    fn deadline_times_out_submitting_and_polling() {
        assert_eq!(
            StateMachine::next(RunState::Submitting, &MonitorEvent::DeadlineElapsed),
            Some(RunState::TimedOut)
        );
        assert_eq!(
            StateMachine::next(RunState::Polling, &MonitorEvent::DeadlineElapsed),
            Some(RunState::TimedOut)
        );
    }

    #[test]
    fn cancel_applies_in_submitting_and_polling_only() {
        assert_eq!(
            StateMachine::next(RunState::Submitting, &MonitorEvent::CancelRequested),
            Some(RunState::Cancelled)
        );
        assert_eq!(
            StateMachine::next(RunState::Polling, &MonitorEvent::CancelRequested),
            Some(RunState::Cancelled)
        );
        assert_eq!(
            StateMachine::next(RunState::Idle, &MonitorEvent::CancelRequested),
            None
        );
        for terminal in TERMINALS {
            assert_eq!(
                StateMachine::next(terminal, &MonitorEvent::CancelRequested),
                None
            );
        }
    }

    #[test]
    fn terminal_states_absorb_every_event() {
        let events = [
            MonitorEvent::SubmitIssued,
            MonitorEvent::CreateSucceeded { job_id: 1 },
            MonitorEvent::CreateFailed,
            MonitorEvent::PollReturned(GenerationStatus::Completed),
            MonitorEvent::PollFailed,
            MonitorEvent::DeadlineElapsed,
            MonitorEvent::CancelRequested,
        ];
        for terminal in TERMINALS {
            for event in &events {
                assert_eq!(StateMachine::next(terminal, event), None);
            }
        }
    }

    #[test]
    fn stale_poll_after_cancellation_is_discarded() {
        // The runner applies effects through the reducer; a poll that
        // resolves after the machine left Polling must not transition.
        assert_eq!(
            StateMachine::next(
                RunState::Cancelled,
                &MonitorEvent::PollReturned(GenerationStatus::Completed)
            ),
            None
        );
    }

    #[test]
    fn submit_is_only_valid_from_idle() {
        assert_eq!(
            StateMachine::next(RunState::Idle, &MonitorEvent::SubmitIssued),
            Some(RunState::Submitting)
        );
        assert_eq!(
            StateMachine::next(RunState::Submitting, &MonitorEvent::SubmitIssued),
            None
        );
        assert_eq!(
            StateMachine::next(RunState::Polling, &MonitorEvent::SubmitIssued),
            None
        );
    }

    #[test]
    fn progress_mapping_is_fixed() {
        assert_eq!(progress_for(GenerationStatus::Pending), 10);
        assert_eq!(progress_for(GenerationStatus::Processing), 50);
        assert_eq!(progress_for(GenerationStatus::Completed), 100);
        assert_eq!(progress_for(GenerationStatus::Failed), 0);
    }

    #[test]
    fn state_display() {
        assert_eq!(RunState::Idle.to_string(), "IDLE");
        assert_eq!(RunState::Polling.to_string(), "POLLING");
        assert_eq!(RunState::TimedOut.to_string(), "TIMED_OUT");
    }
}
