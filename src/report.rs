//! Report rendering and artifact persistence.
//!
//! Renderers are pure string builders; all file writes go through a
//! temp-then-rename helper so a crashed run never leaves a half-written
//! artifact behind.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::{EvaluatedPrincipleResult, ProblemStatement, RankedSolution};
use crate::session::Session;

pub const TOP_SOLUTIONS_FILE: &str = "top-solutions.json";
pub const DETAILED_REPORT_FILE: &str = "detailed-report.md";
pub const COMPLETE_EVALUATION_FILE: &str = "complete-evaluation.json";
pub const PROBLEM_STATEMENT_FILE: &str = "problem-statement.json";
pub const RAW_SOLUTIONS_FILE: &str = "raw-solutions.json";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {artifact}: {source}")]
    Serialize {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Console table
// =============================================================================

const RANK_W: usize = 4;
const PRINCIPLE_W: usize = 24;
const CONCEPT_W: usize = 34;
const SCORE_W: usize = 5;
const ASSESS_W: usize = 48;

/// Truncate to `width` characters, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }
    let mut out: String = chars[..width.saturating_sub(1)].iter().collect();
    out.push('…');
    out
}

/// Render the fixed-width results table. Pure; identical input yields
/// identical text.
pub fn render_console_table(ranked: &[RankedSolution]) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(100));
    out.push_str("\nTOP TRIZ SOLUTIONS - RANKED BY WEIGHTED SCORE\n");
    out.push_str(&"=".repeat(100));
    out.push_str("\n\n");

    out.push_str(&format!(
        "{:<RANK_W$} {:<PRINCIPLE_W$} {:<CONCEPT_W$} {:>SCORE_W$} {:<ASSESS_W$}\n",
        "Rank", "Principle", "Concept", "Score", "Assessment"
    ));
    out.push_str(&format!(
        "{} {} {} {} {}\n",
        "-".repeat(RANK_W),
        "-".repeat(PRINCIPLE_W),
        "-".repeat(CONCEPT_W),
        "-".repeat(SCORE_W),
        "-".repeat(ASSESS_W)
    ));

    for (index, solution) in ranked.iter().enumerate() {
        let principle = fit(
            &format!("#{}: {}", solution.principle_id, solution.principle_name),
            PRINCIPLE_W,
        );
        let concept = fit(&solution.concept_name, CONCEPT_W);
        let assessment = fit(&solution.overall_assessment, ASSESS_W);
        out.push_str(&format!(
            "{:<RANK_W$} {:<PRINCIPLE_W$} {:<CONCEPT_W$} {:>SCORE_W$.2} {:<ASSESS_W$}\n",
            index + 1,
            principle,
            concept,
            solution.weighted_score,
            assessment
        ));
    }

    out
}

// =============================================================================
// Detailed markdown report
// =============================================================================

/// Render the detailed markdown document. The timestamp is injected by the
/// caller so the renderer stays deterministic.
pub fn render_detailed_markdown(
    ranked: &[RankedSolution],
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    out.push_str("# TRIZ BRAINSTORMING SESSION - DETAILED REPORT\n\n");
    out.push_str(&format!("Generated: {}\n\n", generated_at.to_rfc3339()));
    out.push_str("---\n\n");

    for (index, solution) in ranked.iter().enumerate() {
        out.push_str(&format!("## {}. {}\n\n", index + 1, solution.concept_name));
        out.push_str(&format!(
            "**TRIZ Principle:** #{} - {}\n\n",
            solution.principle_id, solution.principle_name
        ));
        out.push_str(&format!(
            "**Weighted Score:** {:.2} / 5.00\n\n",
            solution.weighted_score
        ));

        out.push_str(&format!("### Mechanism\n{}\n\n", solution.mechanism));
        out.push_str(&format!(
            "### Real-World Analogy\n{}\n\n",
            solution.real_world_analogy
        ));

        out.push_str("### Implementation Steps\n");
        for (step_index, step) in solution.implementation_steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", step_index + 1, step));
        }
        out.push('\n');

        out.push_str("### KPI Evaluation\n\n");
        out.push_str(&format!(
            "**Overall Assessment:** {}\n\n",
            solution.overall_assessment
        ));

        out.push_str("| Category | KPI | Score | Weight | Justification |\n");
        out.push_str("|----------|-----|-------|--------|---------------|\n");
        for kpi in &solution.kpi_scores {
            out.push_str(&format!(
                "| {} | {} | {}/5 | {:.0}% | {} |\n",
                kpi.category,
                kpi.kpi,
                kpi.score,
                kpi.weight * 100.0,
                kpi.justification
            ));
        }

        out.push_str("\n---\n\n");
    }

    out
}

// =============================================================================
// Persistence
// =============================================================================

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportError> {
    let tmp = path.with_extension("tmp");
    let write = std::fs::write(&tmp, content)
        .and_then(|_| std::fs::rename(&tmp, path));
    write.map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `value` as pretty JSON and write it temp-then-rename.
pub fn write_json<T: Serialize>(
    path: &Path,
    artifact: &'static str,
    value: &T,
) -> Result<(), ReportError> {
    let json = serde_json::to_vec_pretty(value)
        .map_err(|source| ReportError::Serialize { artifact, source })?;
    write_atomic(path, &json)
}

/// Write a text artifact temp-then-rename.
pub fn write_text(path: &Path, content: &str) -> Result<(), ReportError> {
    write_atomic(path, content.as_bytes())
}

/// Persist the four end-of-run artifacts.
///
/// All four writes are attempted independently; failures are collected and
/// returned so one bad write never blocks the others.
pub fn save_reports(
    session: &Session,
    ranked: &[RankedSolution],
    evaluated: &[EvaluatedPrincipleResult],
    problem: &ProblemStatement,
) -> Vec<ReportError> {
    let detailed = render_detailed_markdown(ranked, Utc::now());

    let attempts = [
        write_json(
            &session.artifact_path(TOP_SOLUTIONS_FILE),
            "top solutions",
            &ranked,
        ),
        write_text(&session.artifact_path(DETAILED_REPORT_FILE), &detailed),
        write_json(
            &session.artifact_path(COMPLETE_EVALUATION_FILE),
            "complete evaluation",
            &evaluated,
        ),
        write_json(
            &session.artifact_path(PROBLEM_STATEMENT_FILE),
            "problem statement",
            &problem,
        ),
    ];

    let failures: Vec<ReportError> = attempts.into_iter().filter_map(Result::err).collect();

    if failures.is_empty() {
        eprintln!("\n✓ Reports saved to: {}\n", session.dir().display());
    }

    failures
}

// =============================================================================
// TESTS
// =============================================================================
