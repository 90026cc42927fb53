//! Simulated network latency for the in-memory adapters.

use std::time::Duration;

use rand::Rng;

/// Delay applied before every in-memory service call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    base: Duration,
    jitter: Duration,
}

impl Latency {
    /// No delay at all; used by tests.
    pub const NONE: Self = Self {
        base: Duration::ZERO,
        jitter: Duration::ZERO,
    };

    /// Fixed `base` delay plus a uniformly random extra of up to `jitter`.
    pub const fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// Delay for the next call.
    pub fn sample(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.base;
        }
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        let extra = rand::thread_rng().gen_range(0..=jitter_ms);
        self.base.saturating_add(Duration::from_millis(extra))
    }

    /// Sleep for a sampled delay.
    pub async fn wait(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for latency sampling.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(300, 0)]
    #[case(100, 50)]
    fn samples_stay_within_bounds(#[case] base_ms: u64, #[case] jitter_ms: u64) {
        let latency = Latency::new(Duration::from_millis(base_ms), Duration::from_millis(jitter_ms));
        for _ in 0..32 {
            let sample = latency.sample();
            assert!(sample >= Duration::from_millis(base_ms));
            assert!(sample <= Duration::from_millis(base_ms + jitter_ms));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_for_the_base_delay() {
        let start = tokio::time::Instant::now();
        Latency::new(Duration::from_millis(300), Duration::ZERO).wait().await;
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }
}
