use std::time::Duration;

/// Decision returned by the restart policy after a job failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartDecision {
    /// Restart the job from the top after the given delay.
    RestartAfter(Duration),
    /// Stop restarting and surface the last error.
    GiveUp,
}

/// Backoff policy for restarting a failed job.
///
/// Restarts are unbounded as long as the job keeps making progress: a run
/// that survives at least `healthy_run` before failing resets the rapid-
/// failure counter. Only `max_rapid_failures` consecutive short-lived runs
/// trigger `GiveUp` — that pattern means the endpoint is persistently
/// broken (bad credentials, dead host) and a hot restart loop would churn
/// forever without completing anything.
#[derive(Debug, Clone, Copy)]
pub struct RestartPolicy {
    /// Base delay before the first restart.
    pub base_delay: Duration,
    /// Upper bound on the restart delay.
    pub max_delay: Duration,
    /// Consecutive rapid failures tolerated before giving up.
    pub max_rapid_failures: u32,
    /// Minimum run duration for a failure to be considered "made progress".
    pub healthy_run: Duration,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(60),
            max_rapid_failures: 10,
            healthy_run: Duration::from_secs(5),
        }
    }
}

impl RestartPolicy {
    /// Decide what to do after the `rapid_failures`-th consecutive rapid
    /// failure (1-based). Delay doubles per failure, capped at `max_delay`.
    pub fn decide(&self, rapid_failures: u32) -> RestartDecision {
        if rapid_failures >= self.max_rapid_failures {
            return RestartDecision::GiveUp;
        }
        let exp = 1u32 << rapid_failures.saturating_sub(1).min(8);
        let raw = self.base_delay.saturating_mul(exp);
        RestartDecision::RestartAfter(raw.min(self.max_delay))
    }
}
