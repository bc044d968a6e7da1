use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::RngCore;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use crate::algorithms::stopping_condition::{MaxRestarts, StoppingCondition, TimeLimit};
use crate::core::utils::{get_worker_rng, EPS};
use crate::core::{DataStore, GainMatrix, Individual, OError};
use crate::operators::{initialize, innovative_crossover, local_search, mutate};

/// Configuration for [`GASolver`]. Fields correspond 1:1 to the original driver's tunables; see
/// each field's doc comment for the default it carries over.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Options {
    /// Target population size after selection. Default `40`.
    pub selection_size: usize,
    /// Fraction of `selection_size` used to size each crossover batch. Default `0.5`.
    pub crossover_rate: f64,
    /// Iterations without incumbent improvement before a restart. Default `30`.
    pub restart_generations: usize,
    /// Local-search stagnation bound (see [`crate::operators::local_search`]). Default `50`.
    pub local_search_m: usize,
    /// Parallel worker count. Defaults to the available parallelism.
    pub threads: usize,
    /// Wall-clock time limit. `None` means unbounded.
    pub time_limit: Option<Duration>,
    /// Restart-count limit. `0` means unbounded.
    pub ga_restarts: usize,
    /// Emit human-readable progress lines via `log::info!`.
    pub verbose_output: bool,
    /// Base RNG seed. `None` draws every worker stream from OS entropy (non-reproducible, as in
    /// the original `time(NULL) ^ worker_id` scheme); `Some(seed)` makes every run reproducible.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            selection_size: 40,
            crossover_rate: 0.5,
            restart_generations: 30,
            local_search_m: 50,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            time_limit: None,
            ga_restarts: 0,
            verbose_output: false,
            seed: None,
        }
    }
}

/// The solver's lifecycle: `Clean -> Formulated -> Success | Fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No data has been formulated yet.
    Clean,
    /// `formulate` has succeeded; `solve` may be called.
    Formulated,
    /// `solve` completed a full selection round.
    Success,
    /// A fatal error occurred (e.g. during matrix construction).
    Fail,
}

/// The genetic-algorithm driver: owns the population and drives generate -> local search ->
/// crossover -> select -> restart until termination.
pub struct GASolver {
    options: Options,
    status: Status,
    contig_count: usize,
    matrix: Option<Arc<GainMatrix>>,
    population: Vec<Individual>,
    population_size: usize,
    best_objective: f64,
    best_bits: Vec<bool>,
    iteration: usize,
    restart_count: usize,
    last_success: usize,
    start_time: Option<Instant>,
}

impl GASolver {
    /// Create a new solver in the `Clean` state.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            status: Status::Clean,
            contig_count: 0,
            matrix: None,
            population: Vec::new(),
            population_size: 0,
            best_objective: f64::NEG_INFINITY,
            best_bits: Vec::new(),
            iteration: 0,
            restart_count: 0,
            last_success: 0,
            start_time: None,
        }
    }

    /// Build the gain matrix from `store`. Requires the `Clean` state; on success transitions to
    /// `Formulated`, on matrix-build failure transitions to `Fail`.
    pub fn formulate(&mut self, store: &DataStore) -> Result<(), OError> {
        if self.status != Status::Clean {
            return Err(OError::AlreadyFormulated);
        }
        self.contig_count = store.contig_count();
        match GainMatrix::build(store) {
            Ok(matrix) => {
                self.matrix = Some(Arc::new(matrix));
                self.status = Status::Formulated;
                Ok(())
            }
            Err(e) => {
                self.status = Status::Fail;
                Err(e)
            }
        }
    }

    /// Run the solver to termination. Requires the `Formulated` state.
    pub fn solve(&mut self) -> Result<(), OError> {
        if self.status != Status::Formulated {
            return Err(OError::NotFormulated);
        }
        let matrix = self
            .matrix
            .clone()
            .expect("matrix must be set once Formulated");

        self.best_objective = f64::NEG_INFINITY;
        self.best_bits = vec![false; self.contig_count];
        self.population = Vec::new();
        self.population_size = 0;
        self.iteration = 0;
        self.restart_count = 0;
        self.last_success = 0;
        self.start_time = Some(Instant::now());

        // degenerate input: no contigs means the objective is just the constant summand.
        if self.contig_count == 0 {
            self.best_objective = matrix.constant();
            self.status = Status::Success;
            return Ok(());
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.options.threads)
            .build()
            .map_err(|e| OError::SolverRun(e.to_string()))?;

        let from = self.generate_population(&pool, &matrix, 0);
        self.local_search(&pool, &matrix, from);
        if self.options.verbose_output {
            info!("Generated population: {:.2} ms", self.elapsed_ms());
        }
        self.select_initial_solution();

        let mut last_time = self.elapsed_ms();
        while !self.should_terminate() {
            debug!("Generation #{}, population size {}", self.iteration + 1, self.population_size);
            let from = self.crossover(&pool, &matrix);
            self.local_search(&pool, &matrix, from);
            self.select();
            if self.options.verbose_output {
                let now = self.elapsed_ms();
                info!("Iteration {}: {:.2} ms", self.iteration + 1, now - last_time);
                last_time = now;
            }

            if self.iteration - self.last_success >= self.options.restart_generations {
                self.restart_count += 1;
                self.last_success = self.iteration;
                self.restart(&pool, &matrix);
                if self.options.verbose_output {
                    if self.options.ga_restarts > 0 {
                        info!(
                            "Restarted: attempt {} out of {}",
                            self.restart_count, self.options.ga_restarts
                        );
                    } else {
                        info!("Restarted: attempt {}", self.restart_count);
                    }
                }
            }
            self.iteration += 1;
        }

        self.status = Status::Success;
        Ok(())
    }

    /// The solver's current lifecycle state.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The best objective found, or `-inf` unless `status() == Success`.
    pub fn objective(&self) -> f64 {
        if self.status == Status::Success {
            self.best_objective
        } else {
            f64::NEG_INFINITY
        }
    }

    /// The orientation vector `T[0..n)` for the best solution found.
    pub fn orientation(&self) -> &[bool] {
        &self.best_bits
    }

    fn elapsed(&self) -> Duration {
        self.start_time
            .expect("solve must set start_time before this is called")
            .elapsed()
    }

    fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    fn should_terminate(&self) -> bool {
        if let Some(limit) = self.options.time_limit {
            if TimeLimit(limit).is_met(self.elapsed()) {
                return true;
            }
        }
        if self.options.ga_restarts > 0
            && MaxRestarts(self.options.ga_restarts).is_met(self.restart_count)
        {
            return true;
        }
        false
    }

    /// Fill slots `[from, selection_size)` with freshly greedy-initialized individuals, growing the
    /// population if needed. Returns `from`, the start index local search should process next.
    fn generate_population(
        &mut self,
        pool: &rayon::ThreadPool,
        matrix: &Arc<GainMatrix>,
        from: usize,
    ) -> usize {
        if self.population_size < self.options.selection_size {
            self.population.resize_with(self.options.selection_size, || {
                Individual::from_bits(matrix.clone(), vec![false; self.contig_count])
            });
            self.population_size = self.options.selection_size;
        }

        let seed = self.options.seed;
        let population_size = self.population_size;
        pool.install(|| {
            self.population[from..population_size]
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, slot)| {
                    let mut rng = get_worker_rng(seed, from + i);
                    *slot = initialize(matrix.clone(), &mut *rng);
                });
        });
        from
    }

    /// Apply local search to `[from, population_size)` in parallel.
    fn local_search(&mut self, pool: &rayon::ThreadPool, _matrix: &Arc<GainMatrix>, from: usize) {
        let seed = self.options.seed;
        let local_search_m = self.options.local_search_m;
        let population_size = self.population_size;
        pool.install(|| {
            self.population[from..population_size]
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, ind)| {
                    let mut rng = get_worker_rng(seed, from + i);
                    local_search(ind, local_search_m, &mut *rng);
                });
        });
    }

    /// Append `⌊crossover_rate · selection_size⌋` offspring, each from a uniformly random pair of
    /// current parents. Returns the start index of the newly-appended slice.
    fn crossover(&mut self, pool: &rayon::ThreadPool, matrix: &Arc<GainMatrix>) -> usize {
        let count = (self.options.crossover_rate * self.options.selection_size as f64) as usize;
        let new_size = self.population_size + count;
        let population_size = self.population_size;
        self.population.resize_with(new_size, || {
            Individual::from_bits(matrix.clone(), vec![false; self.contig_count])
        });

        let seed = self.options.seed;
        let (parents, children) = self.population.split_at_mut(population_size);
        pool.install(|| {
            children[..count]
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, child)| {
                    let mut rng = get_worker_rng(seed, population_size + i);
                    let a = (rng.next_u64() as usize) % population_size;
                    let b = (rng.next_u64() as usize) % population_size;
                    *child = innovative_crossover(&parents[a], &parents[b], &mut *rng);
                });
        });
        self.population_size = new_size;
        new_size - count
    }

    /// Sort the population descending by objective, keep only distinct individuals (by bit-vector
    /// equality) up to `selection_size`, and update the incumbent.
    fn select(&mut self) {
        self.population.truncate(self.population_size);
        self.population
            .sort_by(|a, b| b.partial_cmp(a).expect("objective is never NaN"));

        let mut j = 1usize.min(self.population_size);
        for i in 1..self.population_size {
            if self.population[i] != self.population[j - 1] {
                self.population[j] = self.population[i].clone();
                j += 1;
            }
        }
        self.population_size = j.min(self.options.selection_size);
        self.population.truncate(self.population_size);
        self.update_solution(0);
    }

    /// Record the best initial individual as the incumbent.
    fn select_initial_solution(&mut self) {
        let mut best = 0;
        for i in 1..self.population_size {
            if self.population[best].objective() < self.population[i].objective() {
                best = i;
            }
        }
        self.update_solution(best);
    }

    /// Replace the incumbent if `population[idx]` strictly improves on it.
    fn update_solution(&mut self, idx: usize) {
        let objective = self.population[idx].objective();
        if objective > self.best_objective + EPS {
            if self.options.verbose_output {
                info!("Best found: {}", objective);
            }
            self.best_objective = objective;
            self.best_bits = self.population[idx].bits().to_vec();
            self.last_success = self.iteration;
        } else {
            debug!("No improvement over incumbent {}", self.best_objective);
        }
    }

    /// Mutate slots `[1, population_size)` in place (preserving the incumbent at index 0), local
    /// search that slice, then top the population back up to `selection_size` with fresh greedy
    /// individuals and local search only the newly-appended slice.
    fn restart(&mut self, pool: &rayon::ThreadPool, matrix: &Arc<GainMatrix>) {
        let seed = self.options.seed;
        let population_size = self.population_size;
        if population_size > 1 {
            pool.install(|| {
                self.population[1..population_size]
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(i, ind)| {
                        let mut rng = get_worker_rng(seed, 1 + i);
                        mutate(ind, &mut *rng);
                    });
            });
        }
        self.local_search(pool, matrix, 1);

        let from = self.generate_population(pool, matrix, self.population_size);
        self.local_search(pool, matrix, from);
    }
}
