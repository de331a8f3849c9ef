use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{
    ChoiceDisplay, ChoiceQuestion, Question, QuestionBody, ScaleQuestion, TextQuestion,
};

#[derive(Debug)]
pub enum QuestionImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for QuestionImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionImportError::Io(err) => write!(f, "failed to read question catalog: {}", err),
            QuestionImportError::Csv(err) => write!(f, "invalid question CSV data: {}", err),
            QuestionImportError::InvalidRow { line, reason } => {
                write!(f, "invalid question on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for QuestionImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuestionImportError::Io(err) => Some(err),
            QuestionImportError::Csv(err) => Some(err),
            QuestionImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for QuestionImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for QuestionImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: String,
    category: String,
    language: String,
    #[serde(rename = "type")]
    kind: String,
    text: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    interval: Option<String>,
    #[serde(default)]
    low_label: String,
    #[serde(default)]
    high_label: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reversed: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    options: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    multiple: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    display: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    shuffle: Option<String>,
}

impl QuestionRow {
    fn into_question(self) -> Result<Question, String> {
        let body = match self.kind.trim().to_ascii_lowercase().as_str() {
            "scale" => QuestionBody::Scale(ScaleQuestion {
                min: parse_number("min", self.min.as_deref())?,
                max: parse_number("max", self.max.as_deref())?,
                interval: parse_number("interval", self.interval.as_deref())?,
                low_label: self.low_label,
                high_label: self.high_label,
                shuffle: parse_flag("shuffle", self.shuffle.as_deref(), true)?,
                reversed: parse_flag("reversed", self.reversed.as_deref(), false)?,
                text: self.text,
            }),
            "choice" => QuestionBody::Choice(ChoiceQuestion {
                multiple: parse_flag("multiple", self.multiple.as_deref(), false)?,
                display: parse_display(self.display.as_deref())?,
                options: self
                    .options
                    .as_deref()
                    .map(|raw| raw.split('|').map(|option| option.trim().to_string()).collect())
                    .unwrap_or_default(),
                shuffle: parse_flag("shuffle", self.shuffle.as_deref(), false)?,
                text: self.text,
            }),
            "text" => QuestionBody::Text(TextQuestion { text: self.text }),
            other => return Err(format!("unsupported question type '{other}'")),
        };

        Ok(Question {
            id: self.id,
            category: self.category,
            language: self.language,
            required: parse_flag("required", self.required.as_deref(), true)?,
            question: body,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: Option<&str>) -> Result<T, String> {
    let raw = raw.ok_or_else(|| format!("missing '{field}'"))?;
    raw.trim()
        .parse()
        .map_err(|_| format!("'{field}' must be numeric, got '{raw}'"))
}

fn parse_flag(field: &str, raw: Option<&str>, default: bool) -> Result<bool, String> {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(value) => match value.as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(format!("'{field}' must be true or false, got '{value}'")),
        },
    }
}

fn parse_display(raw: Option<&str>) -> Result<ChoiceDisplay, String> {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        None | Some("radio") => Ok(ChoiceDisplay::Radio),
        Some("checkbox") => Ok(ChoiceDisplay::Checkbox),
        Some("dropdown") => Ok(ChoiceDisplay::Dropdown),
        Some(other) => Err(format!("unsupported display '{other}'")),
    }
}

/// Reads question catalogs exported as CSV.
pub struct QuestionImporter;

impl QuestionImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, QuestionImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Question>, QuestionImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut questions = Vec::new();
        for record in csv_reader.deserialize::<QuestionRow>() {
            let row = record?;
            // Header is line 1.
            let line = questions.len() as u64 + 2;
            let question = row
                .into_question()
                .map_err(|reason| QuestionImportError::InvalidRow { line, reason })?;
            questions.push(question);
        }

        Ok(questions)
    }
}

/// Keeps only the questions written in `language`.
pub fn filter_language(questions: Vec<Question>, language: &str) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|question| question.language.eq_ignore_ascii_case(language))
        .collect()
}
