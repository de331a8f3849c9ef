use serde::Serialize;
use tracing::warn;

use super::answers::AnswerMap;
use super::dimensions::DimensionSpec;
use super::scores::{BoundedScores, Complexity, TraitScores};
use crate::questions::QuestionCatalog;
use crate::theory::{CognitiveFunction, SecondaryTrait};

pub type FunctionScores = BoundedScores<CognitiveFunction>;
pub type SecondaryScores = BoundedScores<SecondaryTrait>;

/// Non-fatal issue observed while scoring an answer map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// The key resolves to no catalog question; the answer was ignored.
    UnknownAnswerKey { key: String },
}

/// Every accumulator rebuilt from one pass over an answer map.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulation {
    pub basic: TraitScores,
    pub advanced: TraitScores,
    pub functions: FunctionScores,
    pub secondary: SecondaryScores,
    pub warnings: Vec<AnalysisWarning>,
}

impl Default for Accumulation {
    fn default() -> Self {
        Self {
            basic: TraitScores::new(Complexity::Basic),
            advanced: TraitScores::new(Complexity::Advanced),
            functions: BoundedScores::new(&CognitiveFunction::ALL),
            secondary: BoundedScores::new(&SecondaryTrait::ALL),
            warnings: Vec::new(),
        }
    }
}

impl Accumulation {
    /// Credits one already-polarized answer value to the accumulators `spec` feeds.
    ///
    /// The basic layer only hears from dimensions without a function pair, so lifestyle,
    /// temperament and attitude answers never reach it.
    pub fn route(&mut self, spec: &DimensionSpec, value: i64, max_value: i64, neutral: i64) {
        let basic_enabled = !spec.has_function();

        if value == 0 {
            self.advanced.add(spec.low_trait, neutral);
            self.advanced.add(spec.high_trait, neutral);
            if basic_enabled {
                self.basic.add(spec.low_trait, neutral);
                self.basic.add(spec.high_trait, neutral);
            }
            if let Some((low, high)) = spec.functions {
                self.functions.add(low, neutral, max_value);
                self.functions.add(high, neutral, max_value);
            }
            if let Some((low, high)) = spec.secondary {
                self.secondary.add(low, neutral, max_value);
                self.secondary.add(high, neutral, max_value);
            }
            return;
        }

        let magnitude = value.abs();
        let credited = if value < 0 {
            spec.low_trait
        } else {
            spec.high_trait
        };

        self.advanced.add(credited, magnitude);
        if basic_enabled {
            self.basic.add(credited, magnitude);
        }
        if let Some((low, high)) = spec.functions {
            let (credited, other) = if value < 0 { (low, high) } else { (high, low) };
            self.functions.add(credited, magnitude, max_value);
            self.functions.add(other, 0, max_value);
        }
        if let Some((low, high)) = spec.secondary {
            let (credited, other) = if value < 0 { (low, high) } else { (high, low) };
            self.secondary.add(credited, magnitude, max_value);
            self.secondary.add(other, 0, max_value);
        }
    }
}

/// Scores answer maps against a fixed catalog.
pub struct Analyzer<'a> {
    catalog: &'a QuestionCatalog,
    neutral_addition: i64,
}

impl<'a> Analyzer<'a> {
    pub fn new(catalog: &'a QuestionCatalog, neutral_addition: i64) -> Self {
        Self {
            catalog,
            neutral_addition,
        }
    }

    pub fn accumulate(&self, answers: &AnswerMap) -> Accumulation {
        let mut accumulation = Accumulation::default();

        for (key, value) in answers.iter() {
            let Some(entry) = self.catalog.get(key) else {
                warn!(key, "answer key does not match any catalog question");
                accumulation
                    .warnings
                    .push(AnalysisWarning::UnknownAnswerKey {
                        key: key.to_string(),
                    });
                continue;
            };

            let value = i64::from(value);
            let value = if entry.reversed { -value } else { value };
            accumulation.route(
                &entry.dimension.spec(),
                value,
                i64::from(entry.max),
                self.neutral_addition,
            );
        }

        accumulation
    }
}
