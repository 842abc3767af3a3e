use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep_until};

use crate::api::{CreateGenerationRequest, GenerationApi};
use crate::state_machine::{
    Attempt, AttemptReport, FailureSource, MonitorEvent, MonitorOutcome, MonitorSnapshot, RunState,
};

/// Timing knobs for one monitored attempt.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Fixed spacing between status polls.
    pub poll_interval: Duration,
    /// Wall-clock budget for the whole attempt, measured from submission.
    pub deadline: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(2000),
            deadline: Duration::from_millis(300_000),
        }
    }
}

/// Remote control for a running monitor.
///
/// Dropping the handle does not stop the attempt; it only gives up the
/// ability to cancel it.
pub struct MonitorHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    snapshot_rx: watch::Receiver<MonitorSnapshot>,
}

impl MonitorHandle {
    /// Ask the monitor to stop watching. Returns `true` if the signal was
    /// delivered; `false` if it was already sent or the attempt has settled.
    pub fn cancel(&mut self) -> bool {
        match self.cancel_tx.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Subscribe to snapshot updates for this attempt.
    pub fn watch(&self) -> watch::Receiver<MonitorSnapshot> {
        self.snapshot_rx.clone()
    }

    /// The most recently published snapshot.
    #[allow(dead_code)]
    pub fn snapshot(&self) -> MonitorSnapshot {
        self.snapshot_rx.borrow().clone()
    }
}

/// Cancellation signal that pends forever once the handle is gone, so a
/// dropped [`MonitorHandle`] disarms cancellation instead of triggering it.
struct CancelSignal {
    rx: Option<oneshot::Receiver<()>>,
}

impl Future for CancelSignal {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let Some(rx) = this.rx.as_mut() else {
            return Poll::Pending;
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(Ok(())) => {
                this.rx = None;
                Poll::Ready(())
            }
            Poll::Ready(Err(_)) => {
                this.rx = None;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Drives one generation attempt from submission to its terminal outcome.
///
/// The monitor owns its poll schedule, its deadline timer and its in-flight
/// transport calls. [`JobMonitor::run`] consumes the monitor, so one
/// instance yields exactly one outcome; a fresh attempt needs a fresh
/// monitor.
pub struct JobMonitor<C> {
    client: C,
    config: MonitorConfig,
    attempt: Attempt,
    snapshot_tx: watch::Sender<MonitorSnapshot>,
    cancel_rx: oneshot::Receiver<()>,
}

impl<C: GenerationApi> JobMonitor<C> {
    pub fn new(client: C, config: MonitorConfig) -> (Self, MonitorHandle) {
        let attempt = Attempt::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(attempt.snapshot(0));
        let (cancel_tx, cancel_rx) = oneshot::channel();
        (
            Self {
                client,
                config,
                attempt,
                snapshot_tx,
                cancel_rx,
            },
            MonitorHandle {
                cancel_tx: Some(cancel_tx),
                snapshot_rx,
            },
        )
    }

    /// Submit the request and watch the job until it settles.
    ///
    /// The deadline runs from this call. A create or poll response that
    /// loses the race against cancellation or the deadline is abandoned
    /// without a state transition.
    pub async fn run(self, request: CreateGenerationRequest) -> (MonitorOutcome, AttemptReport) {
        let JobMonitor {
            client,
            config,
            mut attempt,
            snapshot_tx,
            cancel_rx,
        } = self;
        let mut cancel = CancelSignal {
            rx: Some(cancel_rx),
        };
        let started = Instant::now();

        attempt.apply(&MonitorEvent::SubmitIssued);
        publish(&attempt, &snapshot_tx, started);

        let deadline = sleep_until(started + config.deadline);
        tokio::pin!(deadline);

        // Submit. The selects below are biased so that a deadline which
        // ties with a transport completion or a due poll always wins.
        let created = {
            let create = client.create(&request);
            tokio::pin!(create);
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    return finish(
                        &mut attempt,
                        &snapshot_tx,
                        started,
                        &MonitorEvent::CancelRequested,
                        MonitorOutcome::Cancelled,
                    );
                }
                _ = &mut deadline => {
                    return finish(
                        &mut attempt,
                        &snapshot_tx,
                        started,
                        &MonitorEvent::DeadlineElapsed,
                        MonitorOutcome::TimedOut,
                    );
                }
                res = &mut create => res,
            }
        };

        let job_id = match created {
            Ok(record) => record.id,
            Err(err) => {
                attempt.record_error(err.to_string());
                return finish(
                    &mut attempt,
                    &snapshot_tx,
                    started,
                    &MonitorEvent::CreateFailed,
                    MonitorOutcome::Failed {
                        source: FailureSource::Transport(err),
                    },
                );
            }
        };
        attempt.apply(&MonitorEvent::CreateSucceeded { job_id });
        publish(&attempt, &snapshot_tx, started);

        // First poll comes due one interval after submission.
        let mut ticker = interval_at(started + config.poll_interval, config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    return finish(
                        &mut attempt,
                        &snapshot_tx,
                        started,
                        &MonitorEvent::CancelRequested,
                        MonitorOutcome::Cancelled,
                    );
                }
                _ = &mut deadline => {
                    return finish(
                        &mut attempt,
                        &snapshot_tx,
                        started,
                        &MonitorEvent::DeadlineElapsed,
                        MonitorOutcome::TimedOut,
                    );
                }
                _ = ticker.tick() => {}
            }

            // At most one poll in flight; the next tick is not armed until
            // this response resolves or the attempt settles.
            let polled = {
                let poll = client.get(job_id);
                tokio::pin!(poll);
                tokio::select! {
                    biased;
                    _ = &mut cancel => {
                        return finish(
                            &mut attempt,
                            &snapshot_tx,
                            started,
                            &MonitorEvent::CancelRequested,
                            MonitorOutcome::Cancelled,
                        );
                    }
                    _ = &mut deadline => {
                        return finish(
                            &mut attempt,
                            &snapshot_tx,
                            started,
                            &MonitorEvent::DeadlineElapsed,
                            MonitorOutcome::TimedOut,
                        );
                    }
                    res = &mut poll => res,
                }
            };

            match polled {
                Ok(record) => match attempt.apply(&MonitorEvent::PollReturned(record.status)) {
                    Some(RunState::Polling) => {
                        publish(&attempt, &snapshot_tx, started);
                    }
                    Some(RunState::Completed) => {
                        publish(&attempt, &snapshot_tx, started);
                        let report = AttemptReport::from_attempt(&attempt);
                        return (MonitorOutcome::Completed { record }, report);
                    }
                    Some(RunState::Failed) => {
                        let message = record
                            .error_message
                            .clone()
                            .unwrap_or_else(|| "generation failed".to_string());
                        attempt.record_error(message.as_str());
                        publish(&attempt, &snapshot_tx, started);
                        let report = AttemptReport::from_attempt(&attempt);
                        return (
                            MonitorOutcome::Failed {
                                source: FailureSource::Remote { message },
                            },
                            report,
                        );
                    }
                    // Stale result; the reducer discarded it.
                    _ => {}
                },
                Err(err) => {
                    attempt.record_error(err.to_string());
                    return finish(
                        &mut attempt,
                        &snapshot_tx,
                        started,
                        &MonitorEvent::PollFailed,
                        MonitorOutcome::Failed {
                            source: FailureSource::Transport(err),
                        },
                    );
                }
            }
        }
    }
}

fn publish(attempt: &Attempt, tx: &watch::Sender<MonitorSnapshot>, started: Instant) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let _ = tx.send(attempt.snapshot(elapsed_ms));
}

fn finish(
    attempt: &mut Attempt,
    tx: &watch::Sender<MonitorSnapshot>,
    started: Instant,
    event: &MonitorEvent,
    outcome: MonitorOutcome,
) -> (MonitorOutcome, AttemptReport) {
    attempt.apply(event);
    publish(attempt, tx, started);
    (outcome, AttemptReport::from_attempt(attempt))
}
