use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::theory::{Dominants, MbtiType, Trait, TraitAxis};

/// Which trait layer an accumulator represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    /// Preference questions only.
    Basic,
    /// Every question that carries a trait pair.
    Advanced,
}

/// Signed running totals for the eight trait letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitScores {
    complexity: Complexity,
    totals: [i64; 8],
}

impl TraitScores {
    pub fn new(complexity: Complexity) -> Self {
        Self {
            complexity,
            totals: [0; 8],
        }
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn add(&mut self, letter: Trait, amount: i64) {
        self.totals[slot(letter)] += amount;
    }

    pub fn total(&self, letter: Trait) -> i64 {
        self.totals[slot(letter)]
    }

    /// Sum over all letters.
    pub fn grand_total(&self) -> i64 {
        self.totals.iter().sum()
    }

    /// `side / (side + opposite) * 100`, or `0` when the axis is empty.
    pub fn percentage(&self, letter: Trait) -> f64 {
        pair_percentage(self.total(letter), self.total(letter.opposite()))
    }

    pub fn percentages(&self) -> BTreeMap<Trait, f64> {
        Trait::ALL
            .into_iter()
            .map(|letter| (letter, self.percentage(letter)))
            .collect()
    }

    /// Per axis, the high side when it is strictly greater, otherwise the low side.
    pub fn dominants(&self) -> Dominants {
        let mut letters = [Trait::I; 4];
        for axis in TraitAxis::ALL {
            let (low, high) = (axis.low(), axis.high());
            letters[axis.index()] = if self.total(high) > self.total(low) {
                high
            } else {
                low
            };
        }
        Dominants::new(letters)
    }

    pub fn dominant_type(&self) -> MbtiType {
        // Every derived letter sits on its own axis, so the lookup cannot miss.
        self.dominants().to_type().unwrap_or(MbtiType::INTJ)
    }

    /// Normalized product of per-axis proportions for each of the sixteen types.
    pub fn probabilities(&self) -> BTreeMap<MbtiType, f64> {
        let raw = MbtiType::ALL
            .into_iter()
            .map(|kind| {
                let product = kind
                    .traits()
                    .iter()
                    .map(|letter| self.percentage(*letter) / 100.0)
                    .product::<f64>();
                (kind, product)
            })
            .collect();
        normalize(raw)
    }

    /// Probabilities raised to `exponent` and re-normalized; display-only sharpening.
    pub fn biased_probabilities(&self, exponent: i32) -> BTreeMap<MbtiType, f64> {
        let raised = self
            .probabilities()
            .into_iter()
            .map(|(kind, probability)| (kind, probability.powi(exponent)))
            .collect();
        normalize(raised)
    }
}

fn slot(letter: Trait) -> usize {
    match letter {
        Trait::I => 0,
        Trait::E => 1,
        Trait::N => 2,
        Trait::S => 3,
        Trait::T => 4,
        Trait::F => 5,
        Trait::J => 6,
        Trait::P => 7,
    }
}

pub(crate) fn pair_percentage(side: i64, opposite: i64) -> f64 {
    let total = side + opposite;
    if total == 0 {
        return 0.0;
    }
    side as f64 / total as f64 * 100.0
}

fn normalize(values: BTreeMap<MbtiType, f64>) -> BTreeMap<MbtiType, f64> {
    let total: f64 = values.values().sum();
    values
        .into_iter()
        .map(|(kind, value)| {
            let normalized = if total > 0.0 && total.is_finite() {
                value / total
            } else {
                0.0
            };
            (kind, normalized)
        })
        .collect()
}

/// Totals paired with a per-category ceiling used to bound percentages.
///
/// The ceiling is the largest `max` seen for the category, not a sum over answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedScores<K: Ord> {
    values: BTreeMap<K, i64>,
    max_values: BTreeMap<K, i64>,
}

impl<K: Ord + Copy> BoundedScores<K> {
    pub fn new(categories: &[K]) -> Self {
        Self {
            values: categories.iter().map(|category| (*category, 0)).collect(),
            max_values: categories.iter().map(|category| (*category, 0)).collect(),
        }
    }

    pub fn add(&mut self, category: K, amount: i64, max_value: i64) {
        *self.values.entry(category).or_insert(0) += amount;
        let ceiling = self.max_values.entry(category).or_insert(0);
        if max_value > *ceiling {
            *ceiling = max_value;
        }
    }

    pub fn value(&self, category: K) -> i64 {
        self.values.get(&category).copied().unwrap_or(0)
    }

    pub fn max_value(&self, category: K) -> i64 {
        self.max_values.get(&category).copied().unwrap_or(0)
    }

    /// `value / ceiling * 100`, or `0` before any ceiling is registered.
    pub fn percentage(&self, category: K) -> f64 {
        let ceiling = self.max_value(category);
        if ceiling > 0 {
            self.value(category) as f64 / ceiling as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Share of the summed total across all categories.
    pub fn global_percentage(&self, category: K) -> f64 {
        let total: i64 = self.values.values().sum();
        if total == 0 {
            return 0.0;
        }
        self.value(category) as f64 / total as f64 * 100.0
    }

    pub fn categories(&self) -> impl Iterator<Item = K> + '_ {
        self.values.keys().copied()
    }
}
