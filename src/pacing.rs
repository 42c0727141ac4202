//! Cooperative request pacing.
//!
//! All provider calls are sequential; the only scheduling concern is staying
//! under the provider's request-rate ceiling. Instead of ad hoc sleeps after
//! each call, stages hold a [`Pacer`] configured with a minimum interval
//! between request starts.

use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Pacing policy: minimum spacing between consecutive request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub min_interval: Duration,
}

impl PacingPolicy {
    pub const fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    /// No pacing. Used in tests.
    pub const fn unpaced() -> Self {
        Self {
            min_interval: Duration::ZERO,
        }
    }

    /// Default for ideation requests: one per second.
    pub const fn ideation_default() -> Self {
        Self::new(Duration::from_millis(1000))
    }

    /// Default for evaluation requests: two per second.
    pub const fn evaluation_default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

/// Enforces a [`PacingPolicy`] across a sequence of calls.
#[derive(Debug)]
pub struct Pacer {
    policy: PacingPolicy,
    last_start: Option<Instant>,
}

impl Pacer {
    pub fn new(policy: PacingPolicy) -> Self {
        Self {
            policy,
            last_start: None,
        }
    }

    /// Wait until the policy allows the next request, then mark it started.
    ///
    /// The first call never waits. Applied before every attempt regardless of
    /// whether the previous one succeeded.
    pub async fn pace(&mut self) {
        if let Some(last) = self.last_start {
            let elapsed = last.elapsed();
            if elapsed < self.policy.min_interval {
                sleep(self.policy.min_interval - elapsed).await;
            }
        }
        self.last_start = Some(Instant::now());
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_call_does_not_wait() {
        let mut pacer = Pacer::new(PacingPolicy::new(Duration::from_secs(60)));
        let start = Instant::now();
        pacer.pace().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn spaces_consecutive_calls() {
        let mut pacer = Pacer::new(PacingPolicy::new(Duration::from_millis(1000)));
        pacer.pace().await;
        let before = Instant::now();
        pacer.pace().await;
        assert!(before.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn unpaced_policy_never_waits() {
        let mut pacer = Pacer::new(PacingPolicy::unpaced());
        let start = Instant::now();
        for _ in 0..10 {
            pacer.pace().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
