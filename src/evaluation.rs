//! Per-concept KPI evaluation loop.
//!
//! Nested iteration: principles in catalog order, each principle's concepts in
//! generation order. Every concept gets one scoring request against the full
//! KPI matrix. A failed concept is dropped; a principle whose concepts all
//! fail yields an empty solutions list, not an error. A fatal error stops the
//! stage; partial results already gathered are kept.

use crate::gateway::GenerativeGateway;
use crate::model::{
    EvaluatedConcept, EvaluatedPrincipleResult, KpiMatrix, PrincipleIdeation, ProblemStatement,
};
use crate::pacing::Pacer;
use crate::prompts;
use crate::structured::{self, StructuredError};

/// A concept whose evaluation attempt was dropped.
#[derive(Debug)]
pub struct EvaluationFailure {
    pub principle_id: u32,
    pub concept_index: usize,
    pub concept_name: String,
    pub error: StructuredError,
}

/// Result of the evaluation stage.
#[derive(Debug, Default)]
pub struct EvaluationOutcome {
    pub results: Vec<EvaluatedPrincipleResult>,
    pub failures: Vec<EvaluationFailure>,
}

/// Score every concept of every principle against the KPI matrix.
pub async fn evaluate_all(
    gateway: &dyn GenerativeGateway,
    pacer: &mut Pacer,
    ideations: &[PrincipleIdeation],
    matrix: &KpiMatrix,
    problem: &ProblemStatement,
) -> EvaluationOutcome {
    eprintln!("\n=== Evaluating Solutions Against KPI Matrix ===");
    eprintln!("Evaluating {} principle solution sets...\n", ideations.len());

    let mut outcome = EvaluationOutcome::default();
    let mut fatal = false;

    for ideation in ideations {
        let principle = &ideation.applied_principle;
        eprintln!(
            "  Evaluating solutions for Principle {}: {}...",
            principle.id, principle.name
        );

        let mut solutions = Vec::with_capacity(ideation.solution_concepts.len());

        for (index, concept) in ideation.solution_concepts.iter().enumerate() {
            pacer.pace().await;

            let prompt = prompts::evaluation(problem, &principle.name, concept, matrix);
            match structured::generate_decoded::<crate::model::KpiEvaluation>(
                gateway,
                &prompt,
                "KpiEvaluation",
            )
            .await
            {
                Ok(mut evaluation) => {
                    // The aggregate is recomputed from the score/weight pairs
                    // whenever the model omitted it.
                    evaluation.normalize();
                    solutions.push(EvaluatedConcept {
                        concept: concept.clone(),
                        kpi_evaluation: evaluation,
                    });
                }
                Err(error) => {
                    fatal = !error.is_per_item();
                    eprintln!("    ✗ Concept {} failed: {error}", index + 1);
                    tracing::warn!(
                        principle_id = principle.id,
                        concept_index = index,
                        error = %error,
                        "evaluation request dropped"
                    );
                    outcome.failures.push(EvaluationFailure {
                        principle_id: principle.id,
                        concept_index: index,
                        concept_name: concept.concept_name.clone(),
                        error,
                    });
                    if fatal {
                        break;
                    }
                }
            }
        }

        outcome.results.push(EvaluatedPrincipleResult {
            principle: principle.clone(),
            solutions,
        });

        if fatal {
            eprintln!("  ✗ Stopping evaluation: remaining requests would fail the same way");
            break;
        }
    }

    eprintln!("\n✓ Evaluation complete\n");

    outcome
}
