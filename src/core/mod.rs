pub use datastore::{DataStore, Link};
pub use error::OError;
pub use gain_matrix::GainMatrix;
pub use individual::Individual;

mod datastore;
mod error;
mod gain_matrix;
mod individual;
pub mod utils;
