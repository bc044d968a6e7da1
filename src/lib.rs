//! `scaforient` optimises the orientation of contigs within a genome scaffold.
//!
//! Given a set of contigs and pairwise linking evidence (mate-pair or long-read links that each
//! favour either the same or opposite relative orientation), the crate formulates the problem as
//! unconstrained Boolean quadratic optimisation over `x ∈ {0, 1}^n` and solves it with a parallel
//! genetic algorithm that embeds a randomised k-opt local search at every generation.
//!
//! The typical flow is:
//!
//! ```no_run
//! use scaforient::core::{DataStore, Link};
//! use scaforient::algorithms::{GASolver, Options};
//!
//! let mut store = DataStore::new(4);
//! store.add_link(Link::new(0, 1, 2.0, true).unwrap()).unwrap();
//! store.add_link(Link::new(1, 2, 1.5, false).unwrap()).unwrap();
//! store.add_link(Link::new(2, 3, 3.0, true).unwrap()).unwrap();
//!
//! let mut solver = GASolver::new(Options::default());
//! solver.formulate(&store).unwrap();
//! solver.solve().unwrap();
//! println!("objective = {}", solver.objective());
//! ```

pub mod algorithms;
pub mod core;
pub mod metrics;
pub mod operators;
