//! Worker pool for the per-step fan-out stages.
//!
//! Collision splitting, base-set adaptation and node construction each map
//! independent items (rectangle, cell, base set) on a local rayon pool sized
//! by the configured thread count. Workers write into private buffers that
//! `collect` concatenates in input order, so results never depend on the
//! number of workers.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::ConfigurationError;

/// Fixed-size worker pool.
#[derive(Debug)]
pub struct Parallelism {
    pool: ThreadPool,
}

impl Parallelism {
    /// Pool with `num_threads` workers (`0` lets rayon pick).
    pub fn new(num_threads: usize) -> Result<Self, ConfigurationError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("reachset-worker-{i}"))
            .build()
            .map_err(|e| ConfigurationError::ThreadPool(e.to_string()))?;
        Ok(Self { pool })
    }

    #[inline]
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// `items.map(f)` on the pool, results in input order.
    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        self.pool.install(|| items.par_iter().map(f).collect())
    }

    /// Like [`Parallelism::map`] with an index, where each item yields a
    /// batch; batches are concatenated in input order. The first error wins.
    pub fn try_flat_map_indexed<T, R, E, F>(&self, items: &[T], f: F) -> Result<Vec<R>, E>
    where
        T: Sync,
        R: Send,
        E: Send,
        F: Fn(usize, &T) -> Result<Vec<R>, E> + Sync + Send,
    {
        let buffers: Vec<Vec<R>> = self.pool.install(|| {
            items
                .par_iter()
                .enumerate()
                .map(|(i, item)| f(i, item))
                .collect::<Result<Vec<_>, E>>()
        })?;
        Ok(buffers.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_input_order() {
        let items: Vec<u32> = (0..100).collect();
        for threads in [1, 4] {
            let par = Parallelism::new(threads).unwrap();
            assert_eq!(par.num_threads(), threads);
            let out = par.map(&items, |x| x * 2);
            assert_eq!(out, items.iter().map(|x| x * 2).collect::<Vec<_>>());
        }
    }

    #[test]
    fn flat_map_concatenates_and_propagates_errors() {
        let par = Parallelism::new(3).unwrap();
        let ok: Result<Vec<usize>, String> =
            par.try_flat_map_indexed(&[2usize, 0, 1], |i, &n| Ok(vec![i; n]));
        assert_eq!(ok.unwrap(), vec![0, 0, 2]);

        let err: Result<Vec<usize>, String> = par.try_flat_map_indexed(&[1usize, 2, 3], |_, &n| {
            if n == 2 {
                Err("boom".to_string())
            } else {
                Ok(vec![n])
            }
        });
        assert_eq!(err, Err("boom".to_string()));
    }
}
