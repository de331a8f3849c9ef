use std::fmt;

use serde::{Deserialize, Serialize};

use super::answers::AnswerMap;
use super::config::PhaseTargets;
use super::dimensions::Family;
use crate::questions::QuestionCatalog;

/// Questionnaire stage, derived from answered counts and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Preferences,
    Lifestyle,
    Temperament,
    Attitude,
    Completed,
}

impl Phase {
    /// The four answerable phases in the order they must be completed.
    pub const ORDERED: [Phase; 4] = [
        Phase::Preferences,
        Phase::Lifestyle,
        Phase::Temperament,
        Phase::Attitude,
    ];

    pub fn family(self) -> Option<Family> {
        match self {
            Phase::Preferences => Some(Family::Preference),
            Phase::Lifestyle => Some(Family::Lifestyle),
            Phase::Temperament => Some(Family::Temperament),
            Phase::Attitude => Some(Family::Attitude),
            Phase::Completed => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Preferences => "PREFERENCES",
            Phase::Lifestyle => "LIFESTYLE",
            Phase::Temperament => "TEMPERAMENT",
            Phase::Attitude => "ATTITUDE",
            Phase::Completed => "COMPLETED",
        }
    }
}

impl From<Family> for Phase {
    fn from(value: Family) -> Self {
        match value {
            Family::Preference => Phase::Preferences,
            Family::Lifestyle => Phase::Lifestyle,
            Family::Temperament => Phase::Temperament,
            Family::Attitude => Phase::Attitude,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answered-question counts per phase; unknown keys are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    pub preferences: usize,
    pub lifestyle: usize,
    pub temperament: usize,
    pub attitude: usize,
}

impl PhaseCounts {
    pub fn tally(answers: &AnswerMap, catalog: &QuestionCatalog) -> Self {
        let mut counts = Self::default();
        for (key, _) in answers.iter() {
            if let Some(entry) = catalog.get(key) {
                *counts.slot_mut(entry.dimension.family()) += 1;
            }
        }
        counts
    }

    pub fn count(&self, phase: Phase) -> usize {
        match phase {
            Phase::Preferences => self.preferences,
            Phase::Lifestyle => self.lifestyle,
            Phase::Temperament => self.temperament,
            Phase::Attitude => self.attitude,
            Phase::Completed => 0,
        }
    }

    fn slot_mut(&mut self, family: Family) -> &mut usize {
        match family {
            Family::Preference => &mut self.preferences,
            Family::Lifestyle => &mut self.lifestyle,
            Family::Temperament => &mut self.temperament,
            Family::Attitude => &mut self.attitude,
        }
    }

    /// The earliest phase whose count is still below target.
    pub fn current_phase(&self, targets: &PhaseTargets) -> Phase {
        Phase::ORDERED
            .into_iter()
            .find(|phase| self.count(*phase) < targets.target(*phase))
            .unwrap_or(Phase::Completed)
    }

    /// Unanswered questions still required, clamped at zero per phase.
    pub fn remaining(&self, targets: &PhaseTargets) -> usize {
        Phase::ORDERED
            .into_iter()
            .map(|phase| targets.target(phase).saturating_sub(self.count(phase)))
            .sum()
    }
}
