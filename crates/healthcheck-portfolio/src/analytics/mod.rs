//! Shared aggregation algorithms.
//!
//! - [`weights`]: per-row weight resolution
//! - [`aggregate`]: group sums, weighted averages, top-N
//! - [`policy`]: policy targets, benchmark metadata and the policy join
//! - [`columns`]: column lookup by candidate header
//! - [`parallel`]: conditional rayon evaluation

pub mod aggregate;
pub mod columns;
pub mod parallel;
pub mod policy;
pub mod weights;

pub use aggregate::{group_sum, group_table, top_n, top_n_indices, top_n_sum, weighted_average};
pub use columns::{find_column, numeric_column, or_zero, text_column};
pub use parallel::maybe_parallel_map;
pub use policy::{policy_compare, PolicyMeta, PolicyTargets};
pub use weights::{normalize, resolve_weights, ResolvedWeights, WeightSource};
