//! Position weight resolution.

use serde::Serialize;

/// Where resolved weights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeightSource {
    /// The explicit `Weight %` column, used as given.
    Explicit,
    /// Explicit weights were off 100 and were recomputed from values.
    Recomputed,
    /// No weight column; derived from values.
    Derived,
    /// Nothing to derive from.
    Zero,
}

/// Per-row weights in percent plus their provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedWeights {
    /// One weight per row. Missing explicit weights are zero.
    pub weights: Vec<f64>,
    /// How the weights were obtained.
    pub source: WeightSource,
}

impl ResolvedWeights {
    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Normalizes values to percentages of their total.
///
/// Missing values count as zero. Returns `None` when the total is not
/// positive.
#[must_use]
pub fn normalize(values: &[Option<f64>]) -> Option<Vec<f64>> {
    let total: f64 = values.iter().flatten().sum();
    (total > 0.0).then(|| {
        values
            .iter()
            .map(|v| v.unwrap_or(0.0) / total * 100.0)
            .collect()
    })
}

/// Resolves per-row weights.
///
/// 1. Explicit weights are used as given, unless values are also present with
///    a positive total and the explicit weights are further than `tolerance`
///    from 100; then weights are recomputed from values.
/// 2. Without explicit weights, values are normalized to 100.
/// 3. Otherwise every weight is zero.
#[must_use]
pub fn resolve_weights(
    explicit: Option<&[Option<f64>]>,
    values: Option<&[Option<f64>]>,
    rows: usize,
    tolerance: f64,
) -> ResolvedWeights {
    let derived = values.and_then(normalize);

    match (explicit, derived) {
        (Some(w), derived) => {
            let weights: Vec<f64> = w.iter().map(|v| v.unwrap_or(0.0)).collect();
            let total: f64 = weights.iter().sum();
            match derived {
                Some(d) if (total - 100.0).abs() > tolerance => ResolvedWeights {
                    weights: d,
                    source: WeightSource::Recomputed,
                },
                _ => ResolvedWeights {
                    weights,
                    source: WeightSource::Explicit,
                },
            }
        }
        (None, Some(d)) => ResolvedWeights {
            weights: d,
            source: WeightSource::Derived,
        },
        (None, None) => ResolvedWeights {
            weights: vec![0.0; rows],
            source: WeightSource::Zero,
        },
    }
}
