//! Prompt templates for the three LLM interactions: intake normalization,
//! per-principle ideation, and per-concept KPI evaluation.
//!
//! Domain logic for rendering prompts. Provider-agnostic. The output-format
//! skeletons here must stay in sync with the typed shapes in [`crate::model`];
//! decoding is strict, so a drifted skeleton shows up as schema mismatches.

use crate::model::{KpiMatrix, Principle, ProblemStatement, SolutionConcept};

/// A prompt template with `{placeholder}` slots.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub slug: &'static str,
    pub text: &'static str,
}

impl PromptTemplate {
    pub fn render(&self, substitutions: &[(&str, &str)]) -> String {
        let mut out = self.text.to_string();
        for (key, value) in substitutions {
            out = out.replace(&format!("{{{key}}}"), value);
        }
        out.trim().to_string()
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

// =============================================================================
// Intake normalization
// =============================================================================

pub const INTAKE_TEMPLATE: PromptTemplate = PromptTemplate {
    slug: "intake_normalize_v1",
    text: r#"You are a TRIZ expert. Convert the following user input into a well-structured JSON format for TRIZ problem analysis.

User Input:
{user_input}

Create a JSON object with the following structure:
{
  "problem_title": "string",
  "domain": "string",
  "current_situation": {
    "description": "string",
    "technical_limitations": "string"
  },
  "ideal_final_result": {
    "description": "string",
    "constraints": ["array of strings"]
  },
  "the_contradiction": {
    "improve": "string",
    "worsen": "string"
  },
  "resources": {
    "available": ["array of strings"]
  }
}

Return ONLY the JSON object, no additional text."#,
};

/// Render the normalization prompt around the raw intake answers.
pub fn intake_normalization(raw_answers_json: &str) -> String {
    INTAKE_TEMPLATE.render(&[("user_input", raw_answers_json)])
}

// =============================================================================
// Ideation
// =============================================================================

pub const IDEATION_TEMPLATE: PromptTemplate = PromptTemplate {
    slug: "ideation_v1",
    text: r#"**Role:** You are a Senior R&D Engineer and TRIZ Master Consultant. You specialize in lateral thinking and cross-industry innovation transfer.

**Task:** You must generate innovative solutions for a specific problem using **ONLY** one specific TRIZ Principle.

**Inputs:**

1.  **The Problem:** A problem statement provided in the JSON format below.
2.  **The Constraint:** You must strictly use **TRIZ Principle {principle_id}: {principle_name}** (and no others).

**Process:**
1.  **Deconstruct the Problem:** read the JSON and explicitly state the technical contradiction (what improves vs. what worsens) and the barrier behind it.
2.  **Analyze the Principle:** explain how {principle_name} traditionally resolves this type of contradiction.
3.  **Cross-Domain Search:** identify 3 real-world examples where this principle is used in *different* industries (e.g. biology, aerospace, software) to solve a similar abstract problem.
4.  **Synthesize Solutions:** generate exactly 5 distinct solution concepts for the problem, derived strictly from those examples.
5.  **Recommend:** select the single most promising concept and justify the choice.

**The Problem Data (JSON):**
{problem_json}

**The TRIZ Principle:**
{principle_json}

**Output Format:**
Organize your response as a well-structured JSON object exactly like this:
{
  "applied_principle": { "id": {principle_id}, "name": "{principle_name}" },
  "contradiction_analysis": {
    "improve": "string",
    "worsen": "string",
    "identified_barrier": "string"
  },
  "principle_strategy": "string",
  "cross_domain_analogies": [
    { "domain": "string", "concept": "string", "insight": "string" }
  ],
  "solution_concepts": [
    {
      "concept_name": "string",
      "mechanism": "string",
      "real_world_analogy": "string",
      "implementation_steps": ["string"]
    }
  ],
  "recommendation": { "selected_concept": "string", "rationale": "string" }
}

Return ONLY the JSON object, no additional text."#,
};

pub fn ideation(problem: &ProblemStatement, principle: &Principle) -> String {
    IDEATION_TEMPLATE.render(&[
        ("principle_id", &principle.id.to_string()),
        ("principle_name", &principle.name),
        ("problem_json", &to_pretty_json(problem)),
        ("principle_json", &to_pretty_json(principle)),
    ])
}

// =============================================================================
// KPI evaluation
// =============================================================================

pub const EVALUATION_TEMPLATE: PromptTemplate = PromptTemplate {
    slug: "evaluation_v1",
    text: r#"You are a Senior Product Manager and Innovation Analyst. Evaluate the following TRIZ solution concept against the KPI matrix.

**Problem Statement:**
{problem_json}

**TRIZ Principle Applied:** {principle_name}

**Solution Concept:**
{concept_json}

**KPI Matrix:**
{kpi_matrix_json}

**Task:**
Score this solution concept against every KPI in the matrix. For each KPI:
1. Provide a score from 1 (Poor) to 5 (Excellent)
2. Provide a brief justification (2-3 sentences)
3. Echo the KPI's category, name and weight from the matrix

Then compute weighted_total_score as sum(score * weight) across all KPIs.

**Output Format (JSON only):**
{
  "kpi_scores": [
    {
      "category": "string",
      "kpi": "string",
      "score": 1,
      "justification": "string",
      "weight": 0.0
    }
  ],
  "weighted_total_score": 0.0,
  "overall_assessment": "string (2-3 sentences summarizing strengths and weaknesses)"
}

Return ONLY the JSON object, no additional text."#,
};

pub fn evaluation(
    problem: &ProblemStatement,
    principle_name: &str,
    concept: &SolutionConcept,
    matrix: &KpiMatrix,
) -> String {
    EVALUATION_TEMPLATE.render(&[
        ("problem_json", &to_pretty_json(problem)),
        ("principle_name", principle_name),
        ("concept_json", &to_pretty_json(concept)),
        ("kpi_matrix_json", &to_pretty_json(matrix)),
    ])
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Contradiction, CurrentSituation, IdealFinalResult, Resources,
    };

    fn problem() -> ProblemStatement {
        ProblemStatement {
            problem_title: "Drone endurance".into(),
            domain: "Aerospace".into(),
            current_situation: CurrentSituation {
                description: "Flight time capped at 20 minutes".into(),
                technical_limitations: "Battery energy density".into(),
            },
            ideal_final_result: IdealFinalResult {
                description: "60 minute missions".into(),
                constraints: vec!["same airframe".into()],
            },
            the_contradiction: Contradiction {
                improve: "endurance".into(),
                worsen: "weight".into(),
            },
            resources: Resources {
                available: vec!["solar film".into()],
            },
        }
    }

    #[test]
    fn ideation_names_the_principle_and_embeds_the_problem() {
        let principle = Principle {
            id: 1,
            name: "Segmentation".into(),
            description: None,
        };
        let prompt = ideation(&problem(), &principle);
        assert!(prompt.contains("TRIZ Principle 1: Segmentation"));
        assert!(prompt.contains("Drone endurance"));
        assert!(prompt.contains("\"id\": 1"));
        // No unfilled placeholders left behind.
        assert!(!prompt.contains("{problem_json}"));
        assert!(!prompt.contains("{principle_name}"));
    }

    #[test]
    fn evaluation_embeds_matrix_and_concept() {
        let matrix = KpiMatrix {
            categories: vec![crate::model::KpiCategory {
                category: "Impact".into(),
                kpi: "IFR Alignment (Ideality)".into(),
                weight: 0.25,
                description: None,
            }],
        };
        let concept = SolutionConcept {
            concept_name: "Segmented battery pods".into(),
            mechanism: "Drop depleted pods mid-flight".into(),
            real_world_analogy: "Rocket staging".into(),
            implementation_steps: vec!["Design pod latch".into()],
        };
        let prompt = evaluation(&problem(), "Segmentation", &concept, &matrix);
        assert!(prompt.contains("Segmented battery pods"));
        assert!(prompt.contains("IFR Alignment (Ideality)"));
        assert!(prompt.contains("**TRIZ Principle Applied:** Segmentation"));
    }

    #[test]
    fn intake_wraps_user_input() {
        let prompt = intake_normalization(r#"{"problem_title":"x"}"#);
        assert!(prompt.contains(r#""problem_title":"x""#));
        assert!(prompt.contains("Return ONLY the JSON object"));
    }
}
