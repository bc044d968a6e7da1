use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum OError {
    #[error("Formulate requires the solver to be in the Clean state")]
    AlreadyFormulated,
    #[error("Solve requires the solver to have been formulated first")]
    NotFormulated,
    #[error("The data store index {0} is out of range for a store of size {1}")]
    NonExistingIndex(usize, usize),
    #[error("A link must connect two distinct contigs, got ({0}, {0})")]
    SelfLink(usize),
    #[error("A link weight must be strictly positive, got {0}")]
    NonPositiveWeight(f64),
    #[error("An error occurred when running the solver: {0}")]
    SolverRun(String),
}
