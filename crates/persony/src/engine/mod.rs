//! Adaptive questioning engine: phase tracking, branch selection and layered scoring.
//!
//! Every operation rescans the full answer map; the only state an engine holds is the catalog
//! and configuration it was built with.

mod answers;
mod analytics;
mod analyzer;
mod config;
mod dimensions;
mod phase;
mod scores;
mod selector;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use tracing::{debug, warn};

pub use analytics::{
    AnalyticsExtra, AnalyticsKind, AnalyticsReport, AnalyticsSnapshot, ScoreItem,
};
pub use analyzer::{Accumulation, AnalysisWarning, Analyzer, FunctionScores, SecondaryScores};
pub use answers::AnswerMap;
pub use config::{EngineConfig, PhaseTargets};
pub use dimensions::{Dimension, DimensionSpec, Family};
pub use phase::{Phase, PhaseCounts};
pub use scores::{BoundedScores, Complexity, TraitScores};
pub use selector::{branch_for, per_category_limit, select_next};

use crate::questions::{CatalogEntry, Question, QuestionCatalog};
use crate::theory::Dominants;

/// Failures raised while building a catalog or serving a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("question category '{category}' is not a known dimension")]
    InvalidCategory { category: String },
    #[error("dominant combination '{dominants}' has no branch in phase {phase}")]
    InvalidDominants { phase: Phase, dominants: String },
    #[error("question key '{key}' appears more than once")]
    DuplicateQuestionKey { key: String },
    #[error("question '{key}' is a {kind} question; only scale questions can be scored")]
    UnsupportedQuestionType { key: String, kind: &'static str },
    #[error("unknown engine '{name}'")]
    UnknownEngine { name: String },
}

/// Capability set shared by questionnaire strategies.
pub trait QuestionnaireEngine: Send + Sync {
    fn name(&self) -> EngineName;

    fn catalog(&self) -> &QuestionCatalog;

    fn current_phase(&self, answers: &AnswerMap) -> Phase;

    fn is_completed(&self, answers: &AnswerMap) -> bool;

    /// Next batch of unanswered questions; `rng` shuffles the pool when present.
    fn infer_next_questions_with(
        &self,
        answers: &AnswerMap,
        max_questions: Option<usize>,
        rng: Option<&mut dyn RngCore>,
    ) -> Result<Vec<&CatalogEntry>, EngineError>;

    fn build_analytics(&self, answers: &AnswerMap) -> Vec<AnalyticsSnapshot>;

    fn remaining(&self, answers: &AnswerMap) -> usize;

    fn result_label(&self, answers: &AnswerMap) -> String;

    /// Analytics together with the answer keys the catalog could not resolve, from one pass.
    fn analyze(&self, answers: &AnswerMap) -> AnalyticsReport;
}

/// The four-phase adaptive questionnaire.
#[derive(Debug, Clone)]
pub struct PersonyEngine {
    catalog: QuestionCatalog,
    config: EngineConfig,
}

impl PersonyEngine {
    /// Validates `questions` against the dimension table and keys them with the configured
    /// strategy.
    pub fn new(questions: Vec<Question>, config: EngineConfig) -> Result<Self, EngineError> {
        let catalog = QuestionCatalog::new(questions, config.question_key)?;
        Ok(Self::from_catalog(catalog, config))
    }

    pub fn from_catalog(catalog: QuestionCatalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn phase_counts(&self, answers: &AnswerMap) -> PhaseCounts {
        PhaseCounts::tally(answers, &self.catalog)
    }

    pub fn current_phase(&self, answers: &AnswerMap) -> Phase {
        self.phase_counts(answers)
            .current_phase(&self.config.questions_count)
    }

    pub fn accumulate(&self, answers: &AnswerMap) -> Accumulation {
        Analyzer::new(&self.catalog, self.config.neutral_addition).accumulate(answers)
    }

    /// Advanced-layer dominants over every answer recorded so far.
    pub fn dominants(&self, answers: &AnswerMap) -> Dominants {
        self.accumulate(answers).advanced.dominants()
    }

    pub fn is_completed(&self, answers: &AnswerMap) -> bool {
        self.current_phase(answers) == Phase::Completed
    }

    /// Next batch using the thread-local generator when `shuffle` is set.
    pub fn infer_next_questions(
        &self,
        answers: &AnswerMap,
        max_questions: Option<usize>,
        shuffle: bool,
    ) -> Result<Vec<&CatalogEntry>, EngineError> {
        if shuffle {
            let mut rng = rand::thread_rng();
            self.infer_next_questions_with(answers, max_questions, Some(&mut rng))
        } else {
            self.infer_next_questions_with(answers, max_questions, None)
        }
    }

    pub fn infer_next_questions_with(
        &self,
        answers: &AnswerMap,
        max_questions: Option<usize>,
        rng: Option<&mut dyn RngCore>,
    ) -> Result<Vec<&CatalogEntry>, EngineError> {
        let phase = self.current_phase(answers);
        if phase == Phase::Completed {
            debug!(answers = answers.len(), "questionnaire already completed");
            return Ok(Vec::new());
        }

        let dominants = self.dominants(answers);
        let batch = select_next(
            &self.catalog,
            answers,
            phase,
            dominants,
            &self.config.questions_count,
            max_questions.unwrap_or(self.config.max_questions),
            rng,
        )?;

        if batch.is_empty() {
            warn!(%phase, %dominants, "catalog has no unanswered questions left for this branch");
        }

        Ok(batch)
    }

    pub fn calculate_remaining_questions_count(&self, answers: &AnswerMap) -> usize {
        self.phase_counts(answers)
            .remaining(&self.config.questions_count)
    }

    pub fn get_analytics(&self, answers: &AnswerMap) -> Vec<AnalyticsSnapshot> {
        analytics::build(&self.accumulate(answers), &self.config)
    }

    pub fn analyze(&self, answers: &AnswerMap) -> AnalyticsReport {
        analytics::report(self.accumulate(answers), &self.config)
    }

    /// Four-letter label from the advanced layer, e.g. `INTJ`.
    pub fn calculate_result_label(&self, answers: &AnswerMap) -> String {
        self.dominants(answers).to_string()
    }
}

impl QuestionnaireEngine for PersonyEngine {
    fn name(&self) -> EngineName {
        EngineName::PersonyV1
    }

    fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    fn current_phase(&self, answers: &AnswerMap) -> Phase {
        PersonyEngine::current_phase(self, answers)
    }

    fn is_completed(&self, answers: &AnswerMap) -> bool {
        PersonyEngine::is_completed(self, answers)
    }

    fn infer_next_questions_with(
        &self,
        answers: &AnswerMap,
        max_questions: Option<usize>,
        rng: Option<&mut dyn RngCore>,
    ) -> Result<Vec<&CatalogEntry>, EngineError> {
        PersonyEngine::infer_next_questions_with(self, answers, max_questions, rng)
    }

    fn build_analytics(&self, answers: &AnswerMap) -> Vec<AnalyticsSnapshot> {
        self.get_analytics(answers)
    }

    fn remaining(&self, answers: &AnswerMap) -> usize {
        self.calculate_remaining_questions_count(answers)
    }

    fn result_label(&self, answers: &AnswerMap) -> String {
        self.calculate_result_label(answers)
    }

    fn analyze(&self, answers: &AnswerMap) -> AnalyticsReport {
        PersonyEngine::analyze(self, answers)
    }
}

/// Registered engine implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineName {
    #[default]
    PersonyV1,
}

impl EngineName {
    pub fn as_str(self) -> &'static str {
        match self {
            EngineName::PersonyV1 => "persony-v1",
        }
    }
}

impl fmt::Display for EngineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "persony-v1" | "persony" => Ok(EngineName::PersonyV1),
            _ => Err(EngineError::UnknownEngine {
                name: s.to_string(),
            }),
        }
    }
}

/// Builds the engine registered under `name`.
pub fn create_engine(
    name: EngineName,
    questions: Vec<Question>,
    config: EngineConfig,
) -> Result<Box<dyn QuestionnaireEngine>, EngineError> {
    match name {
        EngineName::PersonyV1 => Ok(Box::new(PersonyEngine::new(questions, config)?)),
    }
}
