//! Order assessed routes from safest to least safe.

use std::cmp::Reverse;

use crate::assessment::SafetyAssessment;

/// Sort by `safety_score`, highest first.
///
/// The sort is stable: routes with equal scores keep the order they were
/// discovered in.
#[must_use]
pub fn rank_assessments(mut assessments: Vec<SafetyAssessment>) -> Vec<SafetyAssessment> {
    assessments.sort_by_key(|assessment| Reverse(assessment.safety_score));
    assessments
}
