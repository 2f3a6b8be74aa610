// src/analysis/anova.rs
//! One-way analysis of variance across bursts
//!
//! Each burst is one group. The null hypothesis is that every group shares
//! the same mean; the p-value is the upper tail of the F distribution with
//! `(k - 1, N - k)` degrees of freedom.

use super::special::regularized_incomplete_beta;
use super::statistics::mean;
use crate::error::{EmgError, EmgResult};
use crate::processing::segmentation::Burst;
use serde::Serialize;
use tracing::debug;

/// F statistic and p-value of a one-way ANOVA
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnovaResult {
    /// Ratio of between-group to within-group mean squares
    pub f_statistic: f64,
    /// Upper-tail probability of the F statistic
    pub p_value: f64,
    /// Between-group degrees of freedom, `k - 1`
    pub df_between: usize,
    /// Within-group degrees of freedom, `N - k`
    pub df_within: usize,
}

impl AnovaResult {
    /// Whether the null hypothesis is rejected at `alpha`.
    /// A NaN p-value never rejects.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Run a one-way ANOVA with each burst as a group.
///
/// Fails with [`EmgError::InsufficientGroups`] for fewer than two bursts, and
/// with [`EmgError::InvalidData`] when every burst is a single sample, since
/// that leaves no within-group degrees of freedom.
pub fn compare(bursts: &[Burst]) -> EmgResult<AnovaResult> {
    let groups: Vec<&[f64]> = bursts.iter().map(|b| b.samples()).collect();
    one_way_anova(&groups)
}

/// One-way ANOVA over raw groups of observations.
///
/// Needs at least two non-empty groups and more observations than groups.
/// If every group is constant the within-group variance is zero: the F
/// statistic is then infinite (p = 0) when the group means differ and NaN
/// when they do not.
pub fn one_way_anova(groups: &[&[f64]]) -> EmgResult<AnovaResult> {
    let non_empty = groups.iter().filter(|g| !g.is_empty()).count();
    if groups.len() < 2 || non_empty < groups.len() {
        return Err(EmgError::InsufficientGroups { found: non_empty });
    }

    let k = groups.len();
    let total: usize = groups.iter().map(|g| g.len()).sum();
    if total <= k {
        return Err(EmgError::invalid_data(format!(
            "{} observations in {} groups leave no within-group degrees of freedom",
            total, k
        )));
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let group_mean = mean(group);
        ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += group.iter().map(|&v| (v - group_mean).powi(2)).sum::<f64>();
    }

    let df_between = k - 1;
    let df_within = total - k;
    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;

    let f_statistic = if ms_within > 0.0 {
        ms_between / ms_within
    } else if ms_between > 0.0 {
        f64::INFINITY
    } else {
        f64::NAN
    };
    let p_value = f_survival(f_statistic, df_between as f64, df_within as f64);

    debug!(groups = k, observations = total, f_statistic, p_value, "one-way ANOVA");

    Ok(AnovaResult { f_statistic, p_value, df_between, df_within })
}

/// Upper tail `P(F > f)` of the F distribution with `(d1, d2)` degrees of freedom
pub fn f_survival(f: f64, d1: f64, d2: f64) -> f64 {
    if f.is_nan() {
        return f64::NAN;
    }
    if f <= 0.0 {
        return 1.0;
    }
    if f.is_infinite() {
        return 0.0;
    }

    // SF = I_{d2/(d1*f+d2)}(d2/2, d1/2)
    let t = d2 / (d1 * f + d2);
    regularized_incomplete_beta(d2 / 2.0, d1 / 2.0, t)
}
