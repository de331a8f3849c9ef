//! Adaptive personality questionnaire engine.
//!
//! A [`engine::PersonyEngine`] is built once from a question catalog and then answers
//! per-request questions about a respondent's cumulative answer map: which phase they are in,
//! which questions to ask next, how far they are from completion, and what their layered trait
//! scores look like.

pub mod config;
pub mod engine;
pub mod error;
pub mod questions;
pub mod telemetry;
pub mod theory;

pub use engine::{AnswerMap, EngineConfig, EngineError, PersonyEngine, QuestionnaireEngine};
pub use error::AppError;
