pub use solver::{GASolver, Options, Status};
pub use stopping_condition::{MaxRestarts, StoppingCondition, TimeLimit};

mod solver;
mod stopping_condition;
