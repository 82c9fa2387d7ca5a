//! # pump-analyst
//!
//! Memecoin analysis core for the Pump Studio platform.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌────────────────┐   ┌──────────────┐
//! │ MarketClient │──▶│   Snapshot   │──▶│  Orchestrator  │──▶│ AnalysisResult│
//! │  (datapoint) │   └──────────────┘   │ manual/claude/ │   └──────┬───────┘
//! └──────────────┘                      │     codex      │          │
//!        ▲                              └────────────────┘          ▼
//!        │                                              ┌────────────────────┐
//!        └──────────── submit_analysis ◀────────────────│  AnalysisPayload   │
//!                                                       └────────────────────┘
//! ```
//!
//! - **Heuristics** derive every field deterministically from a snapshot.
//! - **Reconciler** validates provider JSON field by field, falling back to
//!   heuristics for anything missing or out of domain.
//! - **Orchestrator** never fails: no key, a provider error, or garbage
//!   output all end in a valid result.
//! - **TrainingRun** drives fetch → analyze → submit over many mints.

pub mod config;
pub mod error;
pub mod format;
pub mod heuristics;
pub mod market;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod reconcile;
pub mod training;

pub use config::{AgentConfig, ConfigSource, ConfigUpdate, Strategy};
pub use error::{AnalystError, Result};
pub use heuristics::compute_defaults;
pub use market::{AnalysisPayload, MarketClient, MockMarketClient, PumpStudioClient};
pub use model::{AnalysisResult, RiskFactor, Snapshot};
pub use orchestrator::Orchestrator;
pub use reconcile::reconcile;
pub use training::{TrainingEvent, TrainingRun, TrainingSummary};
