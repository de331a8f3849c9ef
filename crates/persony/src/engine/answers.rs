use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::questions::QuestionKey;

/// Cumulative answers for one respondent, keyed by question key.
///
/// Iteration is ordered by key so every pass over the map is reproducible regardless of the
/// order in which answers were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionKey, i32>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<QuestionKey>, value: i32) -> Option<i32> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        self.0.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl<K: Into<QuestionKey>> FromIterator<(K, i32)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (K, i32)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

impl<K: Into<QuestionKey>> Extend<(K, i32)> for AnswerMap {
    fn extend<T: IntoIterator<Item = (K, i32)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.0.insert(key.into(), value);
        }
    }
}
