//! Typed shapes for everything that crosses the model boundary.
//!
//! The LLM is instructed to emit these shapes; decoding is strict, so a
//! response missing a field or carrying an out-of-range score surfaces as a
//! schema mismatch rather than flowing silently downstream.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Problem statement
// =============================================================================

/// Normalized description of the user's problem. Created once by intake,
/// immutable afterwards, read by every downstream stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemStatement {
    pub problem_title: String,
    pub domain: String,
    pub current_situation: CurrentSituation,
    pub ideal_final_result: IdealFinalResult,
    pub the_contradiction: Contradiction,
    pub resources: Resources,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSituation {
    pub description: String,
    pub technical_limitations: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdealFinalResult {
    pub description: String,
    pub constraints: Vec<String>,
}

/// The core improve/worsen pair TRIZ works against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contradiction {
    pub improve: String,
    pub worsen: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resources {
    pub available: Vec<String>,
}

// =============================================================================
// Principle catalog
// =============================================================================

/// One entry in the fixed catalog of inventive principles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principle {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Ideation output
// =============================================================================

/// Full consultation produced for one principle: the deconstructed
/// contradiction, the principle's strategy, cross-domain analogies, the five
/// solution concepts, and a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipleIdeation {
    pub applied_principle: AppliedPrinciple,
    pub contradiction_analysis: ContradictionAnalysis,
    pub principle_strategy: String,
    pub cross_domain_analogies: Vec<CrossDomainAnalogy>,
    pub solution_concepts: Vec<SolutionConcept>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedPrinciple {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContradictionAnalysis {
    pub improve: String,
    pub worsen: String,
    pub identified_barrier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossDomainAnalogy {
    pub domain: String,
    pub concept: String,
    pub insight: String,
}

/// One candidate solution generated under one principle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionConcept {
    pub concept_name: String,
    pub mechanism: String,
    pub real_world_analogy: String,
    pub implementation_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub selected_concept: String,
    pub rationale: String,
}

// =============================================================================
// KPI matrix and evaluation
// =============================================================================

/// The fixed weighted rubric every concept is scored against. Echoed verbatim
/// into evaluation prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiMatrix {
    pub categories: Vec<KpiCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiCategory {
    pub category: String,
    pub kpi: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One scored KPI row. Scores outside 1-5 are rejected at decode time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiScore {
    pub category: String,
    pub kpi: String,
    #[serde(deserialize_with = "score_in_range")]
    pub score: u8,
    pub justification: String,
    pub weight: f64,
}

fn score_in_range<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let score = u8::deserialize(deserializer)?;
    if !(1..=5).contains(&score) {
        return Err(serde::de::Error::custom(format!(
            "score {score} out of range 1-5"
        )));
    }
    Ok(score)
}

/// Scoring result for one concept.
///
/// `weighted_total_score` is optional on the wire: the model is asked to
/// compute it, but when it omits the field the engine recomputes it from the
/// score/weight pairs actually present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiEvaluation {
    pub kpi_scores: Vec<KpiScore>,
    #[serde(default)]
    pub weighted_total_score: Option<f64>,
    pub overall_assessment: String,
}

impl KpiEvaluation {
    /// Recompute the aggregate from the score/weight pairs.
    pub fn computed_total(&self) -> f64 {
        self.kpi_scores
            .iter()
            .map(|k| f64::from(k.score) * k.weight)
            .sum()
    }

    /// The reported total when present, otherwise the recomputed one.
    pub fn weighted_total(&self) -> f64 {
        self.weighted_total_score
            .unwrap_or_else(|| self.computed_total())
    }

    /// Fill in the aggregate when the model omitted it.
    pub fn normalize(&mut self) {
        if self.weighted_total_score.is_none() {
            self.weighted_total_score = Some(self.computed_total());
        }
    }
}

/// A concept paired with exactly one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatedConcept {
    #[serde(flatten)]
    pub concept: SolutionConcept,
    pub kpi_evaluation: KpiEvaluation,
}

/// One principle with its evaluated concepts. Empty `solutions` means every
/// concept for that principle failed evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatedPrincipleResult {
    pub principle: AppliedPrinciple,
    pub solutions: Vec<EvaluatedConcept>,
}

// =============================================================================
// Ranking projection
// =============================================================================

/// Flattened, denormalized projection used for reporting. Derived from an
/// [`EvaluatedConcept`] during ranking, never persisted independently of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSolution {
    pub principle_id: u32,
    pub principle_name: String,
    pub concept_name: String,
    pub mechanism: String,
    pub real_world_analogy: String,
    pub weighted_score: f64,
    pub overall_assessment: String,
    pub kpi_scores: Vec<KpiScore>,
    pub implementation_steps: Vec<String>,
}

// =============================================================================
// TESTS
// =============================================================================
