use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Trait to define a condition that causes the solver to terminate.
pub trait StoppingCondition<T: PartialOrd> {
    /// The target value of the stopping condition.
    fn target(&self) -> T;

    /// Whether the stopping condition is met.
    fn is_met(&self, current: T) -> bool {
        self.target() <= current
    }

    /// A name describing the stopping condition.
    fn name() -> String;
}

/// Elapsed wall-clock time after which the solver terminates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct TimeLimit(pub Duration);

impl StoppingCondition<Duration> for TimeLimit {
    fn target(&self) -> Duration {
        self.0
    }

    fn name() -> String {
        "time limit".to_string()
    }
}

/// Number of restarts after which the solver terminates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct MaxRestarts(pub usize);

impl StoppingCondition<usize> for MaxRestarts {
    fn target(&self) -> usize {
        self.0
    }

    fn name() -> String {
        "maximum number of restarts".to_string()
    }
}
