#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use triz_harness::catalog::{self, CatalogError};
use triz_harness::gateway::{GeminiAdapter, ProviderError};
use triz_harness::intake::{self, IntakeError, StdinAnswerSource};
use triz_harness::pacing::{Pacer, PacingPolicy};
use triz_harness::report::{self, ReportError};
use triz_harness::session::Session;
use triz_harness::{evaluation, ideation, ranking};

#[derive(Parser)]
#[command(name = "triz", version, about = "TRIZ brainstorming harness")]
struct Cli {
    /// Directory holding the principle catalog and KPI matrix
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Root directory for per-session artifacts
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Concepts kept per principle in the final ranking
    #[arg(long, default_value_t = ranking::DEFAULT_TOP_N)]
    top_n: usize,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to create session directory: {0}")]
    Session(#[from] std::io::Error),
    #[error("{failed} of 4 report artifacts failed to write")]
    PartialSave { failed: usize },
}

fn banner(text: &str) {
    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║   {text:<61}║");
    println!("╚════════════════════════════════════════════════════════════════╝");
}

async fn run(cli: Cli) -> Result<(), RunError> {
    banner("TRIZ BRAINSTORMING - Powered by Gemini LLM");
    println!();

    // Missing credential is a fatal startup condition.
    let gateway = GeminiAdapter::from_env()?;

    let session = Session::create(&cli.output_dir)?;

    // Step 1: collect and normalize the problem statement.
    let mut answers = StdinAnswerSource;
    println!("=== TRIZ Problem Statement Collector ===\n");
    println!("Please answer the following questions to define your problem:\n");
    let problem = intake::collect(&mut answers, &gateway).await?;

    // Written immediately so a partial run still leaves the statement behind;
    // overwritten identically at run end.
    report::write_json(
        &session.artifact_path(report::PROBLEM_STATEMENT_FILE),
        "problem statement",
        &problem,
    )?;

    // Step 2: load reference data.
    println!("Loading TRIZ principles...");
    let principles = catalog::load_principles(&cli.data_dir)?;
    println!("✓ Loaded {} TRIZ principles\n", principles.len());

    // Step 3: ideation, one paced request per principle.
    let mut ideation_pacer = Pacer::new(PacingPolicy::ideation_default());
    let ideations =
        ideation::generate_all(&gateway, &mut ideation_pacer, &problem, &principles).await;

    report::write_json(
        &session.artifact_path(report::RAW_SOLUTIONS_FILE),
        "raw solutions",
        &ideations.results,
    )?;

    // Step 4: KPI matrix + evaluation.
    println!("Loading KPI matrix...");
    let kpi_matrix = catalog::load_kpi_matrix(&cli.data_dir)?;

    let mut evaluation_pacer = Pacer::new(PacingPolicy::evaluation_default());
    let evaluated = evaluation::evaluate_all(
        &gateway,
        &mut evaluation_pacer,
        &ideations.results,
        &kpi_matrix,
        &problem,
    )
    .await;

    // Step 5: rank and report.
    println!(
        "Selecting top {} solutions per principle...\n",
        cli.top_n
    );
    let ranked = ranking::select_top_solutions(&evaluated.results, cli.top_n);

    println!("{}", report::render_console_table(&ranked));

    let save_failures = report::save_reports(&session, &ranked, &evaluated.results, &problem);
    for failure in &save_failures {
        eprintln!("✗ {failure}");
    }

    banner("TRIZ BRAINSTORMING SESSION COMPLETE!");
    println!();
    println!("Session ID: {}", session.id());
    println!("Output directory: {}", session.dir().display());
    if !ideations.failures.is_empty() || !evaluated.failures.is_empty() {
        println!(
            "Dropped items: {} principles, {} concepts",
            ideations.failures.len(),
            evaluated.failures.len()
        );
    }
    println!();

    if !save_failures.is_empty() {
        return Err(RunError::PartialSave {
            failed: save_failures.len(),
        });
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("\n✗ Error during brainstorming session: {error}");
            ExitCode::FAILURE
        }
    }
}
