//! Question model, keyed catalog, and CSV import.

pub mod catalog;
pub mod import;

pub use catalog::{CatalogEntry, QuestionCatalog};
pub use import::{filter_language, QuestionImportError, QuestionImporter};

use serde::{Deserialize, Serialize};

pub type QuestionId = String;
pub type QuestionKey = String;

/// How answer-map keys are derived from catalog questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// The question id on its own.
    #[default]
    Id,
    /// `category#id`.
    CategoryAndId,
}

impl KeyStrategy {
    pub fn key_for(self, question: &Question) -> QuestionKey {
        match self {
            KeyStrategy::Id => question.id.clone(),
            KeyStrategy::CategoryAndId => format!("{}#{}", question.category, question.id),
        }
    }
}

/// A catalog question as stored by the questionnaire owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: String,
    pub language: String,
    #[serde(default = "default_required")]
    pub required: bool,
    pub question: QuestionBody,
}

fn default_required() -> bool {
    true
}

impl Question {
    pub fn scale(&self) -> Option<&ScaleQuestion> {
        match &self.question {
            QuestionBody::Scale(scale) => Some(scale),
            _ => None,
        }
    }

    pub fn text(&self) -> &str {
        match &self.question {
            QuestionBody::Choice(choice) => &choice.text,
            QuestionBody::Text(text) => &text.text,
            QuestionBody::Scale(scale) => &scale.text,
        }
    }
}

/// Type-specific payload, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionBody {
    Choice(ChoiceQuestion),
    Text(TextQuestion),
    Scale(ScaleQuestion),
}

impl QuestionBody {
    pub fn kind(&self) -> &'static str {
        match self {
            QuestionBody::Choice(_) => "choice",
            QuestionBody::Text(_) => "text",
            QuestionBody::Scale(_) => "scale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceDisplay {
    Radio,
    Checkbox,
    Dropdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub text: String,
    pub multiple: bool,
    pub display: ChoiceDisplay,
    pub options: Vec<String>,
    #[serde(default)]
    pub shuffle: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextQuestion {
    pub text: String,
}

/// Signed agreement scale; answers range over `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleQuestion {
    pub text: String,
    pub min: i32,
    pub max: i32,
    pub interval: f32,
    #[serde(default)]
    pub low_label: String,
    #[serde(default)]
    pub high_label: String,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Answers are negated before scoring when set.
    #[serde(default)]
    pub reversed: bool,
}

fn default_shuffle() -> bool {
    true
}
