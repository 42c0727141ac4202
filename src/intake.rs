//! Problem statement intake.
//!
//! Eight free-text answers are gathered from an [`AnswerSource`] (the binary
//! wires in stdin; tests script the answers), packaged into a raw shape, and
//! normalized into a typed [`ProblemStatement`] by one structured LLM call.

use serde::Serialize;
use thiserror::Error;

use crate::gateway::GenerativeGateway;
use crate::model::ProblemStatement;
use crate::prompts;
use crate::structured::{self, StructuredError};

pub const QUESTIONS: [&str; 8] = [
    "1. What is the title of your problem? ",
    "2. What domain/industry does this problem belong to? ",
    "3. Describe the current situation and technical limitations: ",
    "4. What is the ideal final result you want to achieve? ",
    "5. What are the key constraints? (comma-separated): ",
    "6. What parameter do you want to IMPROVE? ",
    "7. What parameter typically WORSENS when you try to improve the above? ",
    "8. What resources are available? (comma-separated): ",
];

/// Source of interactive answers. The prompt/readline mechanics live behind
/// this seam; the pipeline only sees eight strings.
pub trait AnswerSource {
    fn ask(&mut self, question: &str) -> std::io::Result<String>;
}

/// Reads answers from stdin, echoing the question first.
pub struct StdinAnswerSource;

impl AnswerSource for StdinAnswerSource {
    fn ask(&mut self, question: &str) -> std::io::Result<String> {
        use std::io::Write;
        print!("{question}");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Raw intake answers, pre-normalization.
#[derive(Debug, Clone, Serialize)]
pub struct RawAnswers {
    pub problem_title: String,
    pub domain: String,
    pub current_situation: String,
    pub ideal_result: String,
    pub constraints: Vec<String>,
    pub improve: String,
    pub worsen: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read answer: {0}")]
    Input(#[from] std::io::Error),

    /// Normalization did not yield the required problem-statement shape.
    #[error("problem statement normalization failed: {0}")]
    Normalization(#[from] StructuredError),
}

/// Split a comma-delimited answer into trimmed, non-empty items.
pub fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Gather the eight answers from the source.
pub fn gather(source: &mut dyn AnswerSource) -> Result<RawAnswers, IntakeError> {
    let mut answers = Vec::with_capacity(QUESTIONS.len());
    for question in QUESTIONS {
        answers.push(source.ask(question)?);
    }

    let mut answers = answers.into_iter();
    // Order matches QUESTIONS.
    let problem_title = answers.next().unwrap_or_default();
    let domain = answers.next().unwrap_or_default();
    let current_situation = answers.next().unwrap_or_default();
    let ideal_result = answers.next().unwrap_or_default();
    let constraints = split_list(&answers.next().unwrap_or_default());
    let improve = answers.next().unwrap_or_default();
    let worsen = answers.next().unwrap_or_default();
    let resources = split_list(&answers.next().unwrap_or_default());

    Ok(RawAnswers {
        problem_title,
        domain,
        current_situation,
        ideal_result,
        constraints,
        improve,
        worsen,
        resources,
    })
}

/// Collect answers and normalize them into a [`ProblemStatement`].
///
/// Validation is strict: the LLM response is decoded into the typed shape, so
/// a missing top-level field is an intake failure, never a pass-through.
pub async fn collect(
    source: &mut dyn AnswerSource,
    gateway: &dyn GenerativeGateway,
) -> Result<ProblemStatement, IntakeError> {
    let raw = gather(source)?;

    eprintln!("\nConverting your input to a structured problem statement...");

    let raw_json = serde_json::to_string_pretty(&raw).unwrap_or_default();
    let prompt = prompts::intake_normalization(&raw_json);

    let problem =
        structured::generate_decoded::<ProblemStatement>(gateway, &prompt, "ProblemStatement")
            .await?;

    eprintln!("✓ Problem statement created\n");

    Ok(problem)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Vec<&'static str>);

    impl AnswerSource for Scripted {
        fn ask(&mut self, _question: &str) -> std::io::Result<String> {
            Ok(self.0.remove(0).to_string())
        }
    }

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list(" solar film , spare mass budget ,, "),
            vec!["solar film".to_string(), "spare mass budget".to_string()]
        );
    }

    #[test]
    fn gather_splits_the_two_list_answers() {
        let mut source = Scripted(vec![
            "Drone endurance",
            "Aerospace",
            "20 minute flight cap",
            "60 minute missions",
            "same airframe, no new battery chemistry",
            "endurance",
            "weight",
            "solar film, ground swap stations",
        ]);
        let raw = gather(&mut source).unwrap();
        assert_eq!(raw.problem_title, "Drone endurance");
        assert_eq!(raw.constraints.len(), 2);
        assert_eq!(raw.resources, vec!["solar film", "ground swap stations"]);
    }
}
