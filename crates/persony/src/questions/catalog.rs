use std::collections::HashMap;

use tracing::info;

use super::{KeyStrategy, Question, QuestionKey};
use crate::engine::{AnswerMap, Dimension, EngineError};

/// A validated scale question bound to its dimension and answer key.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub key: QuestionKey,
    pub dimension: Dimension,
    /// Largest attainable answer magnitude.
    pub max: i32,
    pub reversed: bool,
    pub question: Question,
}

/// Immutable, ordered question set the engine selects from.
///
/// Construction fails fast: every question must be a scale question, carry a known dimension
/// tag, and produce a key that no other question shares.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<QuestionKey, usize>,
    strategy: KeyStrategy,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>, strategy: KeyStrategy) -> Result<Self, EngineError> {
        let mut entries = Vec::with_capacity(questions.len());
        let mut index = HashMap::with_capacity(questions.len());

        for question in questions {
            let key = strategy.key_for(&question);
            let dimension = Dimension::lookup(&question.category)?;
            let scale = question
                .scale()
                .ok_or_else(|| EngineError::UnsupportedQuestionType {
                    key: key.clone(),
                    kind: question.question.kind(),
                })?;
            let (max, reversed) = (scale.max, scale.reversed);

            if index.insert(key.clone(), entries.len()).is_some() {
                return Err(EngineError::DuplicateQuestionKey { key });
            }

            entries.push(CatalogEntry {
                key,
                dimension,
                max,
                reversed,
                question,
            });
        }

        info!(questions = entries.len(), ?strategy, "question catalog loaded");

        Ok(Self {
            entries,
            index,
            strategy,
        })
    }

    pub fn key_strategy(&self) -> KeyStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.index.get(key).map(|position| &self.entries[*position])
    }

    /// Unanswered questions of one dimension, in catalog order.
    pub fn remaining<'a, 'b>(
        &'a self,
        dimension: Dimension,
        answers: &'b AnswerMap,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'b
    where
        'a: 'b,
    {
        self.entries
            .iter()
            .filter(move |entry| entry.dimension == dimension && !answers.contains_key(&entry.key))
    }

    pub fn count_for(&self, dimension: Dimension) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.dimension == dimension)
            .count()
    }
}
