#![forbid(unsafe_code)]

//! # triz-harness
//!
//! A TRIZ brainstorming pipeline driven by a generative LLM. One run collects
//! a structured problem statement, generates solution concepts under each of
//! the 40 inventive principles (one paced request per principle), scores every
//! concept against a weighted KPI rubric, and renders ranked console and file
//! reports.
//!
//! Control flow is strictly linear: intake → ideation → evaluation → ranking
//! → reporting. Per-item failures are dropped and accounted for; only
//! run-level failures abort.

pub mod catalog;
pub mod evaluation;
pub mod gateway;
pub mod ideation;
pub mod intake;
pub mod model;
pub mod pacing;
pub mod prompts;
pub mod ranking;
pub mod report;
pub mod session;
pub mod structured;

pub use gateway::{GeminiAdapter, GenerativeGateway, ProviderError};
pub use pacing::{Pacer, PacingPolicy};
pub use ranking::{select_top_solutions, DEFAULT_TOP_N};
pub use session::Session;
pub use structured::StructuredError;
