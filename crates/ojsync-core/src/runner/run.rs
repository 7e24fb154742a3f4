//! Restart loop: run a job body until it succeeds or the policy gives up.

use anyhow::{Context, Result};
use std::future::Future;
use std::time::Instant;

use super::policy::{RestartDecision, RestartPolicy};

/// Runs `job` until it returns `Ok`, restarting it from the top on every
/// failure with the policy's backoff in between. Each failure is logged with
/// the job name so interrupted batches can be traced in the log file.
///
/// A run that lasted at least `policy.healthy_run` before failing resets the
/// rapid-failure counter; only consecutive short-lived failures count toward
/// `GiveUp`, which returns the last error with context.
pub async fn run_with_restart<F, Fut>(name: &str, policy: &RestartPolicy, mut job: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut rapid_failures = 0u32;
    loop {
        let started = Instant::now();
        match job().await {
            Ok(()) => {
                tracing::info!(job = name, "job completed");
                return Ok(());
            }
            Err(err) => {
                if started.elapsed() >= policy.healthy_run {
                    rapid_failures = 0;
                }
                rapid_failures += 1;
                match policy.decide(rapid_failures) {
                    RestartDecision::GiveUp => {
                        tracing::error!(
                            job = name,
                            rapid_failures,
                            "giving up after repeated immediate failures"
                        );
                        return Err(err)
                            .with_context(|| format!("job {name} failed {rapid_failures} times in a row"));
                    }
                    RestartDecision::RestartAfter(delay) => {
                        tracing::error!(
                            job = name,
                            error = %err,
                            delay_ms = delay.as_millis() as u64,
                            "job failed, restarting"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn fast_policy(max_rapid_failures: u32) -> RestartPolicy {
        RestartPolicy {
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            max_rapid_failures,
            healthy_run: Duration::from_secs(60),
        }
    }

    #[tokio::test]
    async fn restarts_until_success() {
        let attempts = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&attempts);
        let result = run_with_restart("test-job", &fast_policy(10), move || {
            let attempts = Arc::clone(&seen);
            async move {
                if attempts.fetch_add(1, Ordering::AcqRel) < 2 {
                    anyhow::bail!("flaky");
                }
                Ok(())
            }
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::Acquire), 3);
    }

    #[tokio::test]
    async fn gives_up_on_persistent_failure() {
        let attempts = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&attempts);
        let result = run_with_restart("broken-job", &fast_policy(3), move || {
            let attempts = Arc::clone(&seen);
            async move {
                attempts.fetch_add(1, Ordering::AcqRel);
                anyhow::bail!("bad credentials")
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::Acquire), 3);
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("broken-job"));
        assert!(msg.contains("bad credentials"));
    }

    #[tokio::test]
    async fn succeeding_immediately_runs_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&attempts);
        run_with_restart("easy-job", &fast_policy(2), move || {
            let attempts = Arc::clone(&seen);
            async move {
                attempts.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
        })
        .await
        .unwrap();
        assert_eq!(attempts.load(Ordering::Acquire), 1);
    }
}
