use std::sync::atomic::{AtomicUsize, Ordering};
use log::{debug, warn};
use rayon::prelude::*;

pub trait ParallelProcessor {
    /// Builds a dedicated pool with `jobs` threads.
    ///
    /// Falls back to rayon's global pool if the dedicated one can't be built.
    fn build_pool(jobs: usize) -> Option<rayon::ThreadPool> {
        match rayon::ThreadPoolBuilder::new().num_threads(jobs.max(1)).build() {
            Ok(pool) => {
                debug!("Using {} threads for processing", pool.current_num_threads());
                Some(pool)
            }
            Err(e) => {
                warn!("Couldn't build thread pool, using the global one: {}", e);
                None
            }
        }
    }

    fn get_progress_counter() -> AtomicUsize {
        AtomicUsize::new(0)
    }

    /// Maps `f` over `items` in parallel. The output keeps the input order.
    fn ordered_map<T, F, R>(jobs: usize, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        let progress = Self::get_progress_counter();
        let total = items.len();
        let run = || {
            items
                .par_iter()
                .map(|item| {
                    let result = f(item);
                    let processed = progress.fetch_add(1, Ordering::SeqCst) + 1;
                    if processed % 100 == 0 || processed == total {
                        debug!("Progress: {}/{} files", processed, total);
                    }
                    result
                })
                .collect::<Vec<R>>()
        };

        match Self::build_pool(jobs) {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}
