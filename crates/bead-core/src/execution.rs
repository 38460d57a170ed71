//! Execution engines for per-file batch work
//!
//! Every file of a batch is processed independently, so the engines only need
//! to map an index space to results. Output order always follows input order,
//! whichever engine runs the work.

use serde::{Deserialize, Serialize};

/// Execution strategy for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// One file after another on the calling thread
    Sequential,
    /// Files distributed over the rayon thread pool
    #[default]
    Parallel,
}

/// Engine mapping independent work items to ordered results
pub trait ExecutionEngine: Send + Sync {
    /// Run `f` for every index in `0..count`, returning results in index order
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// The strategy this engine implements
    fn strategy(&self) -> ExecutionStrategy;

    /// Number of worker threads
    fn num_threads(&self) -> usize;
}

/// Sequential execution on the calling thread
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    /// Create a new sequential engine
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine on the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create with a dedicated pool of `num_threads` workers
    pub fn with_num_threads(num_threads: usize) -> crate::Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create thread pool: {e}"))?;

        Ok(Self {
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        if let Some(pool) = &self.thread_pool {
            pool.install(|| (0..count).into_par_iter().map(f).collect())
        } else {
            (0..count).into_par_iter().map(f).collect()
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Engine chosen at runtime from an `ExecutionStrategy`
#[derive(Clone, Debug)]
pub enum AutoEngine {
    Sequential(SequentialEngine),
    #[cfg(feature = "parallel")]
    Parallel(ParallelEngine),
}

/// Build the engine for a strategy
///
/// Without the `parallel` feature a parallel request runs sequentially.
pub fn engine_for(strategy: ExecutionStrategy) -> AutoEngine {
    match strategy {
        ExecutionStrategy::Sequential => AutoEngine::Sequential(SequentialEngine),
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel => AutoEngine::Parallel(ParallelEngine::new()),
        #[cfg(not(feature = "parallel"))]
        ExecutionStrategy::Parallel => {
            tracing::debug!("parallel feature disabled, running sequentially");
            AutoEngine::Sequential(SequentialEngine)
        }
    }
}

impl ExecutionEngine for AutoEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        match self {
            AutoEngine::Sequential(engine) => engine.execute_batch(count, f),
            #[cfg(feature = "parallel")]
            AutoEngine::Parallel(engine) => engine.execute_batch(count, f),
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        match self {
            AutoEngine::Sequential(engine) => engine.strategy(),
            #[cfg(feature = "parallel")]
            AutoEngine::Parallel(engine) => engine.strategy(),
        }
    }

    fn num_threads(&self) -> usize {
        match self {
            AutoEngine::Sequential(engine) => engine.num_threads(),
            #[cfg(feature = "parallel")]
            AutoEngine::Parallel(engine) => engine.num_threads(),
        }
    }
}
