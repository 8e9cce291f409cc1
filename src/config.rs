//! Settings for classifying regions.

use std::time::Duration;

use crate::error::ValidationError;

/// Budget used when none is configured.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(8);

/// How often a region whose search ran out of time is attempted again.
///
/// Each extra attempt starts from a fresh search state with the previous
/// budget multiplied by `growth`. Only [`TimeoutUnknown`] results are retried;
/// a proven result is final.
///
/// [`TimeoutUnknown`]: crate::Classification::TimeoutUnknown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts per region, including the first one.
    pub max_attempts: u32,
    /// Factor applied to the budget before each further attempt.
    pub growth: u32,
}

impl RetryPolicy {
    /// Exactly one attempt at the configured budget.
    pub const fn single() -> Self {
        RetryPolicy {
            max_attempts: 1,
            growth: 1,
        }
    }

    /// Budget for the 1-based `attempt`, starting from `base`.
    pub fn budget_for(&self, attempt: u32, base: Duration) -> Duration {
        let factor = self.growth.saturating_pow(attempt.saturating_sub(1));
        base.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::single()
    }
}

/// Configuration for an [`Orchestrator`](crate::Orchestrator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveConfig {
    /// Wall-clock budget for one search attempt on one region.
    pub time_budget: Duration,
    /// What to do when an attempt runs out of time.
    pub retry: RetryPolicy,
}

impl SolveConfig {
    /// Configuration with the given budget and no retries.
    pub fn with_time_budget(time_budget: Duration) -> Self {
        SolveConfig {
            time_budget,
            retry: RetryPolicy::single(),
        }
    }

    /// Replace the retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Check that every setting allows at least some search to happen.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_budget.is_zero() {
            return Err(ValidationError::ZeroBudget);
        }
        if self.retry.max_attempts == 0 {
            return Err(ValidationError::ZeroAttempts);
        }
        if self.retry.growth == 0 {
            return Err(ValidationError::ZeroGrowth);
        }
        Ok(())
    }
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig::with_time_budget(DEFAULT_TIME_BUDGET)
    }
}
