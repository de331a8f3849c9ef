use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::questions::KeyStrategy;

/// Tunables for scoring and question selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Credited to both sides of an axis when an answer is exactly zero.
    pub neutral_addition: i64,
    pub questions_count: PhaseTargets,
    /// Batch size cap for `infer_next_questions`.
    pub max_questions: usize,
    /// Exponent applied by the biased probability view.
    pub bias_exponent: i32,
    pub question_key: KeyStrategy,
    /// Append the stability-axis snapshot to the analytics list.
    pub include_secondary: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neutral_addition: 1,
            questions_count: PhaseTargets::default(),
            max_questions: 8,
            bias_exponent: 2,
            question_key: KeyStrategy::Id,
            include_secondary: false,
        }
    }
}

/// Number of answered questions required to leave each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTargets {
    pub preferences: usize,
    pub lifestyle: usize,
    pub temperament: usize,
    pub attitude: usize,
}

impl Default for PhaseTargets {
    fn default() -> Self {
        Self {
            preferences: 32,
            lifestyle: 16,
            temperament: 16,
            attitude: 8,
        }
    }
}

impl PhaseTargets {
    pub fn target(&self, phase: Phase) -> usize {
        match phase {
            Phase::Preferences => self.preferences,
            Phase::Lifestyle => self.lifestyle,
            Phase::Temperament => self.temperament,
            Phase::Attitude => self.attitude,
            Phase::Completed => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.preferences + self.lifestyle + self.temperament + self.attitude
    }
}
