use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named decision factor with a relative importance weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub weight: f64,
}

/// An option scored against the criteria, keyed by criterion name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub scores: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub name: String,
    #[serde(rename = "finalScore")]
    pub final_score: f64,
}

/// Rank alternatives by the SMART weighted sum.
///
/// Weights are normalized by their total, so they need not sum to 1. When the
/// total weight is zero (including an empty criteria list) every alternative
/// scores `0.0`. Scores missing for a criterion count as `0.0`.
///
/// The result is sorted by descending `final_score`; equal scores keep their
/// input order.
pub fn rank(alternatives: &[Alternative], criteria: &[Criterion]) -> Vec<RankedResult> {
    let weights = normalized_weights(criteria);

    let mut ranked: Vec<RankedResult> = alternatives
        .iter()
        .map(|alternative| RankedResult {
            name: alternative.name.clone(),
            final_score: weighted_sum(alternative, criteria, weights.as_deref()),
        })
        .collect();

    // sort_by is stable, ties stay in input order
    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}

/// Each weight divided by the total, or `None` when the total is zero.
///
/// Weights are first scaled by the largest magnitude so the total cannot
/// overflow for weights near `f64::MAX`.
fn normalized_weights(criteria: &[Criterion]) -> Option<Vec<f64>> {
    let scale = criteria
        .iter()
        .map(|c| c.weight.abs())
        .fold(0.0, f64::max);
    if scale == 0.0 {
        return None;
    }

    let scaled: Vec<f64> = criteria.iter().map(|c| c.weight / scale).collect();
    let total: f64 = scaled.iter().sum();
    if total == 0.0 {
        return None;
    }

    Some(scaled.into_iter().map(|w| w / total).collect())
}

fn weighted_sum(
    alternative: &Alternative,
    criteria: &[Criterion],
    weights: Option<&[f64]>,
) -> f64 {
    let Some(weights) = weights else {
        return 0.0;
    };

    criteria
        .iter()
        .zip(weights)
        .fold(0.0, |sum, (criterion, weight)| {
            let score = alternative
                .scores
                .get(&criterion.name)
                .copied()
                .unwrap_or(0.0);
            sum + weight * score
        })
}
