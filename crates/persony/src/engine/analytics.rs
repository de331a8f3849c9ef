use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::analyzer::{Accumulation, AnalysisWarning, FunctionScores, SecondaryScores};
use super::config::EngineConfig;
use super::scores::{pair_percentage, Complexity, TraitScores};
use crate::theory::{function_stack, CognitiveFunction, MbtiType, SecondaryTrait, Trait};

/// Which accumulator a snapshot was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalyticsKind {
    BaseMbtiTraits,
    AdvancedMbtiTraits,
    JungFunctions,
    SecondaryTraits,
}

impl AnalyticsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalyticsKind::BaseMbtiTraits => "BASE_MBTI_TRAITS",
            AnalyticsKind::AdvancedMbtiTraits => "ADVANCED_MBTI_TRAITS",
            AnalyticsKind::JungFunctions => "JUNG_FUNCTIONS",
            AnalyticsKind::SecondaryTraits => "SECONDARY_TRAITS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreItem {
    pub category_name: String,
    pub value: i64,
    pub percentage: f64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsExtra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_combo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<MbtiType, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biased_probabilities: Option<BTreeMap<MbtiType, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_level: Option<Complexity>,
    /// Function stack of the dominant type, dominant function first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_stack: Option<Vec<CognitiveFunction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_percentages: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values: Option<BTreeMap<String, i64>>,
}

/// One independently normalized view over an accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub name: AnalyticsKind,
    pub items: Vec<ScoreItem>,
    pub extra: AnalyticsExtra,
}

impl AnalyticsSnapshot {
    pub fn item(&self, category_name: &str) -> Option<&ScoreItem> {
        self.items
            .iter()
            .find(|item| item.category_name == category_name)
    }
}

/// Snapshots plus the warnings raised while accumulating them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub analytics: Vec<AnalyticsSnapshot>,
    pub warnings: Vec<AnalysisWarning>,
}

pub fn report(accumulation: Accumulation, config: &EngineConfig) -> AnalyticsReport {
    AnalyticsReport {
        analytics: build(&accumulation, config),
        warnings: accumulation.warnings,
    }
}

/// Renders the snapshot list in a fixed order: basic, advanced, functions, then secondary when
/// configured.
pub fn build(accumulation: &Accumulation, config: &EngineConfig) -> Vec<AnalyticsSnapshot> {
    let mut snapshots = vec![
        trait_snapshot(&accumulation.basic, config.bias_exponent),
        trait_snapshot(&accumulation.advanced, config.bias_exponent),
        function_snapshot(&accumulation.functions),
    ];
    if config.include_secondary {
        snapshots.push(secondary_snapshot(&accumulation.secondary));
    }
    snapshots
}

pub fn trait_snapshot(scores: &TraitScores, bias_exponent: i32) -> AnalyticsSnapshot {
    let items = Trait::ALL
        .into_iter()
        .map(|letter| ScoreItem {
            category_name: letter.to_string(),
            value: scores.total(letter),
            percentage: scores.percentage(letter),
            tags: vec![letter.category_name().to_string()],
        })
        .collect();

    let (name, stack) = match scores.complexity() {
        Complexity::Basic => (AnalyticsKind::BaseMbtiTraits, None),
        Complexity::Advanced => (
            AnalyticsKind::AdvancedMbtiTraits,
            Some(function_stack(scores.dominant_type()).to_vec()),
        ),
    };

    AnalyticsSnapshot {
        name,
        items,
        extra: AnalyticsExtra {
            dominant_combo: Some(scores.dominants().to_string()),
            probabilities: Some(scores.probabilities()),
            biased_probabilities: Some(scores.biased_probabilities(bias_exponent)),
            complexity_level: Some(scores.complexity()),
            function_stack: stack,
            ..AnalyticsExtra::default()
        },
    }
}

pub fn function_snapshot(scores: &FunctionScores) -> AnalyticsSnapshot {
    let items = CognitiveFunction::ALL
        .into_iter()
        .map(|function| ScoreItem {
            category_name: function.to_string(),
            value: scores.value(function),
            percentage: scores.percentage(function),
            tags: function.tags().iter().map(|tag| tag.to_string()).collect(),
        })
        .collect();

    let global_percentages = scores
        .categories()
        .map(|function| (function.to_string(), scores.global_percentage(function)))
        .collect();
    let max_values = scores
        .categories()
        .map(|function| (function.to_string(), scores.max_value(function)))
        .collect();

    AnalyticsSnapshot {
        name: AnalyticsKind::JungFunctions,
        items,
        extra: AnalyticsExtra {
            global_percentages: Some(global_percentages),
            max_values: Some(max_values),
            ..AnalyticsExtra::default()
        },
    }
}

/// Stability axis rendered with pair-ratio percentages rather than ceilings.
pub fn secondary_snapshot(scores: &SecondaryScores) -> AnalyticsSnapshot {
    let items = SecondaryTrait::ALL
        .into_iter()
        .map(|side| ScoreItem {
            category_name: side.to_string(),
            value: scores.value(side),
            percentage: pair_percentage(scores.value(side), scores.value(side.opposite())),
            tags: vec![side.category_name().to_string()],
        })
        .collect();

    AnalyticsSnapshot {
        name: AnalyticsKind::SecondaryTraits,
        items,
        extra: AnalyticsExtra::default(),
    }
}
