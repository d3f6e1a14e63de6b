use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride for AutoRows must be valid.
    #[error("row stride must be > 0 for AutoRows strategy")]
    InvalidRowStride(usize),

    /// Input and output sizes do not match.
    #[error("source and destination slices must have the same length")]
    SizeMismatch,
}

/// Controls how parallel operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process every element in parallel.
    ///
    /// This maximizes parallelism but may have overhead for small operations.
    #[default]
    ParallelElements,

    /// Use the global Rayon thread pool to process rows (chunks) in parallel.
    ///
    /// The stride is the number of elements per chunk, usually the length of
    /// the last image axis.
    AutoRows(usize),

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Check the strategy parameters without running anything.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match *self {
            ExecutionStrategy::AutoRows(0) => Err(ParallelError::InvalidRowStride(0)),
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }

    /// Whether the strategy runs on the calling thread only.
    pub fn is_serial(&self) -> bool {
        matches!(self, ExecutionStrategy::Serial)
    }
}

fn install<R, F>(n: usize, f: F) -> Result<R, ParallelError>
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    if n == 0 {
        return Err(ParallelError::InvalidThreadCount(n));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build()
        .map_err(|e| ParallelError::BuildError(e.to_string()))?;

    Ok(pool.install(f))
}

/// Trait to execute operations on a slice with a given strategy.
pub trait ExecuteExt<T> {
    /// Execute an operation on the slice with the given strategy.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `dst` - The destination slice.
    /// * `op` - The operation to perform on each (source, destination) element pair.
    ///
    /// # Returns
    ///
    /// A result indicating success or failure.
    fn execute_with<U, F>(
        &self,
        strategy: ExecutionStrategy,
        dst: &mut [U],
        op: F,
    ) -> Result<(), ParallelError>
    where
        U: Send,
        F: Fn((&T, &mut U)) + Sync + Send;
}

impl<T: Sync + Send> ExecuteExt<T> for &[T] {
    fn execute_with<U, F>(
        &self,
        strategy: ExecutionStrategy,
        dst: &mut [U],
        op: F,
    ) -> Result<(), ParallelError>
    where
        U: Send,
        F: Fn((&T, &mut U)) + Sync + Send,
    {
        if self.len() != dst.len() {
            return Err(ParallelError::SizeMismatch);
        }

        match strategy {
            ExecutionStrategy::Serial => {
                self.iter().zip(dst.iter_mut()).for_each(op);
            }
            ExecutionStrategy::ParallelElements => {
                self.par_iter().zip(dst.par_iter_mut()).for_each(op);
            }
            ExecutionStrategy::AutoRows(stride) => {
                if stride == 0 {
                    return Err(ParallelError::InvalidRowStride(stride));
                }
                self.par_chunks(stride)
                    .zip(dst.par_chunks_mut(stride))
                    .for_each(|(src_row, dst_row)| {
                        src_row.iter().zip(dst_row.iter_mut()).for_each(&op);
                    });
            }
            ExecutionStrategy::Fixed(n) => {
                install(n, || {
                    self.par_iter().zip(dst.par_iter_mut()).for_each(op);
                })?;
            }
        }
        Ok(())
    }
}

/// Apply an operation to each row of a mutable slice.
///
/// Rows are consecutive chunks of `row_len` elements. The operation receives
/// the row number and the row itself. Rows are independent, so the result
/// does not depend on the strategy.
pub fn execute_rows<T, F>(
    strategy: ExecutionStrategy,
    dst: &mut [T],
    row_len: usize,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    strategy.validate()?;
    if dst.is_empty() {
        return Ok(());
    }
    if row_len == 0 {
        return Err(ParallelError::InvalidRowStride(row_len));
    }

    let run = |dst: &mut [T]| {
        dst.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, chunk)| op(row, chunk));
    };

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_mut(row_len)
                .enumerate()
                .for_each(|(row, chunk)| op(row, chunk));
        }
        ExecutionStrategy::ParallelElements | ExecutionStrategy::AutoRows(_) => run(dst),
        ExecutionStrategy::Fixed(n) => install(n, || run(dst))?,
    }
    Ok(())
}

/// Map every item of a slice to a new value, keeping the input order.
pub fn execute_map<T, R, F>(
    strategy: ExecutionStrategy,
    items: &[T],
    op: F,
) -> Result<Vec<R>, ParallelError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    strategy.validate()?;
    if strategy.is_serial() || items.len() < 2 {
        return Ok(items.iter().map(op).collect());
    }
    let out: Vec<R> = match strategy {
        ExecutionStrategy::Fixed(n) => install(n, || items.par_iter().map(op).collect())?,
        _ => items.par_iter().map(op).collect(),
    };
    Ok(out)
}
