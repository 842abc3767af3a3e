//! Usage quota check, evaluated before anything touches the network.

/// The account's generation usage, as last known locally.
///
/// Read-only here: the backend increments the counter when it accepts a
/// submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageCounter {
    pub used: u32,
    pub limit: u32,
}

impl UsageCounter {
    pub fn new(used: u32, limit: u32) -> Self {
        Self { used, limit }
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    /// 80% or more of the limit consumed, time to warn the user.
    pub fn nearing_limit(&self) -> bool {
        u64::from(self.used) * 5 >= u64::from(self.limit) * 4
    }
}

/// The gate's verdict on a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny { reason: String },
}

/// Pure quota gate: denies exactly when the counter is at or over its limit.
pub struct UsageGate;

impl UsageGate {
    pub fn check(usage: &UsageCounter) -> GateDecision {
        if usage.used >= usage.limit {
            GateDecision::Deny {
                reason: "Generation limit reached. Please upgrade your plan.".to_string(),
            }
        } else {
            GateDecision::Allow
        }
    }
}
