//! Two-level ranking: per-principle top-N selection, then a global re-sort.

use std::cmp::Ordering;

use crate::model::{EvaluatedConcept, EvaluatedPrincipleResult, RankedSolution};

/// How many concepts each principle may contribute to the final ranking.
pub const DEFAULT_TOP_N: usize = 2;

fn by_score_desc(a: f64, b: f64) -> Ordering {
    // NaN sorts last; ties keep encounter order (sort_by is stable).
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn project(result: &EvaluatedPrincipleResult, solution: &EvaluatedConcept) -> RankedSolution {
    RankedSolution {
        principle_id: result.principle.id,
        principle_name: result.principle.name.clone(),
        concept_name: solution.concept.concept_name.clone(),
        mechanism: solution.concept.mechanism.clone(),
        real_world_analogy: solution.concept.real_world_analogy.clone(),
        weighted_score: solution.kpi_evaluation.weighted_total(),
        overall_assessment: solution.kpi_evaluation.overall_assessment.clone(),
        kpi_scores: solution.kpi_evaluation.kpi_scores.clone(),
        implementation_steps: solution.concept.implementation_steps.clone(),
    }
}

/// Select the best `top_n` concepts per principle, then merge and re-sort the
/// union globally by weighted score.
///
/// Each principle contributes at most `top_n` entries; the merged list is not
/// capped. Both sorts are stable, so equal scores retain generation order.
pub fn select_top_solutions(
    evaluated: &[EvaluatedPrincipleResult],
    top_n: usize,
) -> Vec<RankedSolution> {
    let mut ranked: Vec<RankedSolution> = Vec::new();

    for result in evaluated {
        let mut solutions: Vec<&EvaluatedConcept> = result.solutions.iter().collect();
        solutions.sort_by(|a, b| {
            by_score_desc(a.kpi_evaluation.weighted_total(), b.kpi_evaluation.weighted_total())
        });

        for solution in solutions.into_iter().take(top_n) {
            ranked.push(project(result, solution));
        }
    }

    ranked.sort_by(|a, b| by_score_desc(a.weighted_score, b.weighted_score));
    ranked
}

// =============================================================================
// TESTS
// =============================================================================
