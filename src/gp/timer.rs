//! Wall-clock budget tracking.

use std::time::{Duration, Instant};

/// Tracks elapsed run time against an optional lead-time budget.
#[derive(Debug, Clone)]
pub struct BudgetTimer {
    started: Instant,
    max_lead_time: Option<Duration>,
}

impl BudgetTimer {
    /// Starts the clock.
    pub fn start(max_lead_time: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            max_lead_time,
        }
    }

    /// Time since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Elapsed minutes, for progress logs.
    pub fn minutes_from_start(&self) -> f64 {
        self.elapsed().as_secs_f64() / 60.0
    }

    /// Whether the budget is exhausted; always `false` without a budget.
    pub fn is_time_limit_reached(&self) -> bool {
        match self.max_lead_time {
            Some(limit) => self.elapsed() >= limit,
            None => false,
        }
    }
}
