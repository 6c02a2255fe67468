//! Conditional parallel evaluation.
//!
//! Uses rayon when the `parallel` feature is enabled. Each task reads only
//! the shared immutable input and returns its own result; results come back
//! in task order.

/// Maps a function over tasks, in parallel when `enabled` and the `parallel`
/// feature is compiled in.
///
/// Callers derive `enabled` from
/// [`AnalyticsConfig::should_parallelize`](crate::AnalyticsConfig::should_parallelize).
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], enabled: bool, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if enabled {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}
