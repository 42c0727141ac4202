//! Per-principle ideation loop.
//!
//! One structured generation request per catalog principle, in catalog order.
//! A failed principle is logged and recorded, never retried or padded; the
//! outcome keeps successes and failures visible side by side. A fatal error
//! (dead credential, bad config) stops the stage instead of burning the
//! remaining paced requests.

use crate::gateway::GenerativeGateway;
use crate::model::{AppliedPrinciple, PrincipleIdeation, Principle, ProblemStatement};
use crate::pacing::Pacer;
use crate::prompts;
use crate::structured::{self, StructuredError};

/// A principle whose generation attempt was dropped.
#[derive(Debug)]
pub struct IdeationFailure {
    pub principle_id: u32,
    pub principle_name: String,
    pub error: StructuredError,
}

/// Result of the ideation stage: successes in catalog order plus the
/// principles that were dropped.
#[derive(Debug, Default)]
pub struct IdeationOutcome {
    pub results: Vec<PrincipleIdeation>,
    pub failures: Vec<IdeationFailure>,
}

/// Generate solution concepts for every principle in catalog order.
pub async fn generate_all(
    gateway: &dyn GenerativeGateway,
    pacer: &mut Pacer,
    problem: &ProblemStatement,
    principles: &[Principle],
) -> IdeationOutcome {
    eprintln!("\n=== Generating TRIZ Solutions ===");
    eprintln!("Processing {} TRIZ principles...\n", principles.len());

    let mut outcome = IdeationOutcome::default();

    for principle in principles {
        eprintln!("  Principle {}: {}...", principle.id, principle.name);

        pacer.pace().await;

        let prompt = prompts::ideation(problem, principle);
        match structured::generate_decoded::<PrincipleIdeation>(
            gateway,
            &prompt,
            "PrincipleIdeation",
        )
        .await
        {
            Ok(mut ideation) => {
                // The catalog, not the model echo, is authoritative for the pairing.
                ideation.applied_principle = AppliedPrinciple {
                    id: principle.id,
                    name: principle.name.clone(),
                };
                outcome.results.push(ideation);
            }
            Err(error) => {
                let fatal = !error.is_per_item();
                eprintln!("  ✗ Principle {} failed: {error}", principle.id);
                tracing::warn!(
                    principle_id = principle.id,
                    error = %error,
                    "ideation request dropped"
                );
                outcome.failures.push(IdeationFailure {
                    principle_id: principle.id,
                    principle_name: principle.name.clone(),
                    error,
                });
                if fatal {
                    eprintln!("  ✗ Stopping ideation: remaining requests would fail the same way");
                    break;
                }
            }
        }
    }

    eprintln!(
        "\n✓ Generated solutions for {} of {} principles\n",
        outcome.results.len(),
        principles.len()
    );

    outcome
}
