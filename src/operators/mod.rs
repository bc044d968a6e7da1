pub use crossover::innovative_crossover;
pub use greedy_init::{initialize, GreedyInitializer};
pub use local_search::run as local_search;
pub use mutation::mutate;

mod crossover;
mod greedy_init;
mod local_search;
mod mutation;
